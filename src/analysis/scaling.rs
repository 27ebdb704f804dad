use super::{mean_throughput_by, Analysis, SkipReason};
use crate::elements::{Dataset, MegabytesPerSecond};

/// Label the benchmark harness gives its multi-threaded variant.
pub const DEFAULT_PARALLEL_ALGORITHM: &str = "BlitzHash-MT";

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScalingPoint {
    pub threads: u32,
    pub measured: MegabytesPerSecond,

    /// Modeled, not measured: the lowest thread count's rate taken as the single-thread rate and
    /// multiplied by `threads`.
    pub ideal: MegabytesPerSecond,
}

/// Mean throughput of the parallel variant per thread count, ascending by thread count, with
/// the ideal linear-scaling reference alongside.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalingCurve {
    pub algorithm: String,
    pub points: Vec<ScalingPoint>,
}

impl ScalingCurve {
    /// Thread count whose measured rate anchors the ideal curve.
    pub fn reference_threads(&self) -> u32 {
        self.points[0].threads
    }

    pub fn max_throughput(&self) -> MegabytesPerSecond {
        self.points
            .iter()
            .map(|p| MegabytesPerSecond::max(p.measured, p.ideal))
            .fold(MegabytesPerSecond::ZERO, MegabytesPerSecond::max)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScalingAnalyzer {
    target_algorithm: String,
}

impl Default for ScalingAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_PARALLEL_ALGORITHM)
    }
}

impl ScalingAnalyzer {
    pub fn new(target_algorithm: impl Into<String>) -> Self {
        Self { target_algorithm: target_algorithm.into() }
    }

    pub fn target_algorithm(&self) -> &str {
        self.target_algorithm.as_str()
    }

    /// Considers every run in the dataset, not only the latest.
    #[tracing::instrument(level = "debug", skip(dataset), fields(records = dataset.len()))]
    pub fn analyze(&self, dataset: &Dataset) -> Analysis<ScalingCurve> {
        let mut parallel = dataset.iter().filter(|r| r.algorithm == self.target_algorithm).peekable();
        if parallel.peek().is_none() {
            tracing::info!(target_algorithm=%self.target_algorithm, "no parallel benchmark records found.");
            return Analysis::Skipped(SkipReason::NoParallelData);
        }

        let by_threads = mean_throughput_by(parallel, |r| r.threads);
        if by_threads.len() < 2 {
            tracing::info!(
                target_algorithm=%self.target_algorithm, thread_counts=%by_threads.len(),
                "scaling requires at least two thread counts."
            );
            return Analysis::Skipped(SkipReason::InsufficientThreadVariety);
        }

        let (reference_threads, reference_rate) = match by_threads.iter().next() {
            Some((threads, rate)) => (*threads, *rate),
            None => return Analysis::Skipped(SkipReason::InsufficientThreadVariety),
        };

        let points: Vec<ScalingPoint> = by_threads
            .into_iter()
            .map(|(threads, measured)| ScalingPoint {
                threads,
                measured,
                ideal: MegabytesPerSecond::new(reference_rate.as_f64() * f64::from(threads)),
            })
            .collect();

        tracing::debug!(?points, %reference_threads, "derived thread scaling curve.");
        Analysis::Ready(ScalingCurve { algorithm: self.target_algorithm.clone(), points })
    }
}
