use std::fmt;

use itertools::Itertools;

use super::mean_throughput_by;
use crate::elements::{Dataset, MegabytesPerSecond, Timestamp};
use crate::error::AnalysisError;

/// Mean throughput of one algorithm in the latest run and its speedup over the baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct AlgorithmThroughput {
    pub algorithm: String,
    pub mean: MegabytesPerSecond,
    pub speedup: f64,
}

/// Per-algorithm mean throughput of the latest run, ranked from slowest to fastest.
///
/// The baseline is whichever algorithm ranks first, i.e. the slowest one observed in the latest
/// run. It is chosen by position, not by name, so the speedup denominator changes if a different
/// algorithm happens to be slowest.
#[derive(Debug, Clone, PartialEq)]
pub struct ThroughputSummary {
    run: Timestamp,
    ranked: Vec<AlgorithmThroughput>,
}

impl ThroughputSummary {
    #[cfg(test)]
    pub(crate) fn from_ranked(run: impl Into<Timestamp>, ranked: Vec<AlgorithmThroughput>) -> Self {
        Self { run: run.into(), ranked }
    }

    pub fn run(&self) -> Timestamp {
        self.run
    }

    pub fn baseline(&self) -> &AlgorithmThroughput {
        &self.ranked[0]
    }

    /// Algorithms ordered by ascending mean throughput.
    pub fn ranked(&self) -> &[AlgorithmThroughput] {
        self.ranked.as_slice()
    }

    pub fn get(&self, algorithm: &str) -> Option<&AlgorithmThroughput> {
        self.ranked.iter().find(|entry| entry.algorithm == algorithm)
    }

    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }
}

impl fmt::Display for ThroughputSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self
            .ranked
            .iter()
            .map(|e| format!("{}:{}({:.2}x)", e.algorithm, e.mean, e.speedup))
            .join(", ");
        write!(f, "ThroughputSummary[run:{:#} baseline:{} {}]", self.run, self.baseline().algorithm, entries)
    }
}

#[derive(Debug, Default, Copy, Clone)]
pub struct ThroughputSummarizer;

impl ThroughputSummarizer {
    #[tracing::instrument(level = "debug", skip(self, dataset), fields(records = dataset.len()))]
    pub fn summarize(&self, dataset: &Dataset) -> Result<ThroughputSummary, AnalysisError> {
        let run = dataset.latest_timestamp().ok_or(AnalysisError::EmptyDataset)?;

        let means = mean_throughput_by(dataset.iter().filter(|r| r.timestamp == run), |r| r.algorithm.as_str());

        // stable sort keeps name order among equal throughputs
        let ranked: Vec<(&str, MegabytesPerSecond)> = means
            .into_iter()
            .sorted_by(|(_, lhs), (_, rhs)| lhs.as_f64().total_cmp(&rhs.as_f64()))
            .collect();

        let (baseline_algorithm, baseline_mean) = ranked[0];
        if baseline_mean.as_f64() == 0.0 {
            return Err(AnalysisError::DivisionByZero { algorithm: baseline_algorithm.to_string() });
        }

        let ranked = ranked
            .into_iter()
            .enumerate()
            .map(|(rank, (algorithm, mean))| {
                let speedup = if rank == 0 { 1.0 } else { mean / baseline_mean };
                if !mean.as_f64().is_finite() || !speedup.is_finite() {
                    return Err(AnalysisError::NonFiniteSpeedup {
                        algorithm: algorithm.to_string(),
                        baseline: baseline_algorithm.to_string(),
                    });
                }

                Ok(AlgorithmThroughput { algorithm: algorithm.to_string(), mean, speedup })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let summary = ThroughputSummary { run, ranked };
        tracing::debug!(%summary, baseline=%baseline_algorithm, "summarized latest benchmark run.");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::BenchmarkRecord;
    use approx::assert_relative_eq;
    use claim::{assert_err, assert_matches};
    use pretty_assertions::assert_eq;

    fn scenario_dataset() -> Dataset {
        vec![
            BenchmarkRecord::new(100, "SHA-256", 1, 50.0),
            BenchmarkRecord::new(100, "BlitzHash", 1, 200.0),
            BenchmarkRecord::new(100, "BlitzHash-MT", 4, 600.0),
        ]
        .into()
    }

    #[test]
    fn test_summarize_single_run_scenario() -> anyhow::Result<()> {
        once_cell::sync::Lazy::force(&crate::tracing::TEST_TRACING);
        let summary = ThroughputSummarizer.summarize(&scenario_dataset())?;

        assert_eq!(summary.run(), Timestamp::from_secs(100));
        assert_eq!(summary.baseline().algorithm, "SHA-256");
        let actual: Vec<(&str, f64, f64)> = summary
            .ranked()
            .iter()
            .map(|e| (e.algorithm.as_str(), e.mean.as_f64(), e.speedup))
            .collect();
        assert_eq!(
            actual,
            vec![
                ("SHA-256", 50.0, 1.0),
                ("BlitzHash", 200.0, 4.0),
                ("BlitzHash-MT", 600.0, 12.0),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_baseline_is_slowest_not_named() -> anyhow::Result<()> {
        let dataset: Dataset = vec![
            BenchmarkRecord::new(7, "SHA-256", 1, 500.0),
            BenchmarkRecord::new(7, "BlitzHash", 1, 125.0),
            BenchmarkRecord::new(7, "BlitzHash-SIMD", 1, 250.0),
        ]
        .into();

        let summary = ThroughputSummarizer.summarize(&dataset)?;
        assert_eq!(summary.baseline().algorithm, "BlitzHash");
        assert_eq!(summary.baseline().speedup, 1.0);
        assert_relative_eq!(summary.get("SHA-256").unwrap().speedup, 4.0);
        assert_relative_eq!(summary.get("BlitzHash-SIMD").unwrap().speedup, 2.0);
        Ok(())
    }

    #[test]
    fn test_speedup_non_decreasing_along_ranking() -> anyhow::Result<()> {
        let dataset: Dataset = vec![
            BenchmarkRecord::new(3, "c", 1, 33.3),
            BenchmarkRecord::new(3, "a", 1, 12.1),
            BenchmarkRecord::new(3, "d", 1, 12.1),
            BenchmarkRecord::new(3, "b", 1, 97.0),
            BenchmarkRecord::new(3, "b", 2, 101.0),
        ]
        .into();

        let summary = ThroughputSummarizer.summarize(&dataset)?;
        let baseline = summary.baseline().mean;
        for pair in summary.ranked().windows(2) {
            assert!(pair[0].mean <= pair[1].mean);
            assert!(pair[0].speedup <= pair[1].speedup);
        }
        for entry in summary.ranked() {
            assert_relative_eq!(entry.speedup, entry.mean / baseline);
        }

        // ties keep name order
        assert_eq!(summary.baseline().algorithm, "a");
        assert_eq!(summary.ranked()[1].algorithm, "d");
        assert_relative_eq!(summary.get("b").unwrap().mean.as_f64(), 99.0);
        Ok(())
    }

    #[test]
    fn test_only_latest_run_is_summarized() -> anyhow::Result<()> {
        let dataset: Dataset = vec![
            BenchmarkRecord::new(200, "SHA-256", 1, 60.0),
            BenchmarkRecord::new(100, "SHA-256", 1, 1.0),
            BenchmarkRecord::new(100, "Legacy", 1, 0.5),
            BenchmarkRecord::new(200, "BlitzHash", 1, 240.0),
            BenchmarkRecord::new(150, "BlitzHash", 1, 9_999.0),
        ]
        .into();

        let summary = ThroughputSummarizer.summarize(&dataset)?;
        assert_eq!(summary.run(), Timestamp::from_secs(200));
        assert_eq!(summary.len(), 2);
        assert_eq!(summary.get("Legacy"), None);
        assert_eq!(summary.get("SHA-256").unwrap().mean, MegabytesPerSecond::new(60.0));
        assert_eq!(summary.get("BlitzHash").unwrap().mean, MegabytesPerSecond::new(240.0));
        assert_relative_eq!(summary.get("BlitzHash").unwrap().speedup, 4.0);
        Ok(())
    }

    #[test]
    fn test_empty_dataset_is_an_error() {
        let result = ThroughputSummarizer.summarize(&Dataset::default());
        assert_matches!(assert_err!(result), AnalysisError::EmptyDataset);
    }

    #[test]
    fn test_zero_baseline_is_division_by_zero() {
        let dataset: Dataset = vec![
            BenchmarkRecord::new(1, "Stalled", 1, 0.0),
            BenchmarkRecord::new(1, "SHA-256", 1, 50.0),
        ]
        .into();

        let result = ThroughputSummarizer.summarize(&dataset);
        assert_matches!(
            assert_err!(result),
            AnalysisError::DivisionByZero { algorithm } if algorithm == "Stalled"
        );
    }

    #[test]
    fn test_vanishing_baseline_is_rejected_not_infinite() {
        let dataset: Dataset = vec![
            BenchmarkRecord::new(1, "Slow", 1, 1e-310),
            BenchmarkRecord::new(1, "Fast", 1, 1e10),
        ]
        .into();
        assert!(dataset.iter().all(|r| r.validate().is_ok()));

        let result = ThroughputSummarizer.summarize(&dataset);
        assert_matches!(
            assert_err!(result),
            AnalysisError::NonFiniteSpeedup { algorithm, baseline } if algorithm == "Fast" && baseline == "Slow"
        );
    }

    #[test]
    fn test_overflowing_mean_is_rejected() {
        let dataset: Dataset = vec![
            BenchmarkRecord::new(1, "Huge", 1, f64::MAX),
            BenchmarkRecord::new(1, "Huge", 2, f64::MAX),
        ]
        .into();

        let result = ThroughputSummarizer.summarize(&dataset);
        assert_matches!(assert_err!(result), AnalysisError::NonFiniteSpeedup { .. });
    }
}
