//! Pure reductions over a loaded [`Dataset`](crate::elements::Dataset).
//!
//! Each analyzer either produces its derived structure or reports why there is not enough data
//! to do so. Not having enough data is an expected outcome, represented by
//! [`Analysis::Skipped`], rather than an error.

use std::collections::BTreeMap;

use strum_macros::Display;

use crate::elements::{BenchmarkRecord, MegabytesPerSecond};

mod history;
mod scaling;
mod throughput;

pub use history::{History, HistoryAnalyzer, TimeSeries};
pub use scaling::{ScalingAnalyzer, ScalingCurve, ScalingPoint, DEFAULT_PARALLEL_ALGORITHM};
pub use throughput::{AlgorithmThroughput, ThroughputSummarizer, ThroughputSummary};

#[derive(Debug, Clone, PartialEq)]
pub enum Analysis<T> {
    Ready(T),
    Skipped(SkipReason),
}

impl<T> Analysis<T> {
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }

    pub fn ready(self) -> Option<T> {
        match self {
            Self::Ready(result) => Some(result),
            Self::Skipped(_) => None,
        }
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            Self::Ready(_) => None,
            Self::Skipped(reason) => Some(*reason),
        }
    }
}

/// Why a chart was intentionally not produced.
#[derive(Debug, Display, Copy, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[strum(to_string = "no parallel data")]
    NoParallelData,

    #[strum(to_string = "insufficient thread-count variety")]
    InsufficientThreadVariety,

    #[strum(to_string = "single run only")]
    SingleRunOnly,
}

#[derive(Debug, Default, Copy, Clone)]
struct MeanAccumulator {
    sum: f64,
    count: usize,
}

impl MeanAccumulator {
    fn add(&mut self, value: MegabytesPerSecond) {
        self.sum += value.as_f64();
        self.count += 1;
    }

    fn mean(&self) -> MegabytesPerSecond {
        MegabytesPerSecond::new(self.sum / self.count as f64)
    }
}

/// Groups records by `key` and reduces each group to its mean throughput.
fn mean_throughput_by<'r, K, I, F>(records: I, key: F) -> BTreeMap<K, MegabytesPerSecond>
where
    K: Ord,
    I: IntoIterator<Item = &'r BenchmarkRecord>,
    F: Fn(&'r BenchmarkRecord) -> K,
{
    let mut groups: BTreeMap<K, MeanAccumulator> = BTreeMap::new();
    for record in records {
        groups.entry(key(record)).or_default().add(record.mb_s);
    }

    groups.into_iter().map(|(k, acc)| (k, acc.mean())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_mean_throughput_by_key() {
        let records = vec![
            BenchmarkRecord::new(1, "a", 1, 10.0),
            BenchmarkRecord::new(1, "b", 1, 5.0),
            BenchmarkRecord::new(2, "a", 1, 20.0),
        ];

        let actual = mean_throughput_by(&records, |r| r.algorithm.as_str());
        assert_eq!(
            actual.into_iter().collect::<Vec<_>>(),
            vec![("a", MegabytesPerSecond::new(15.0)), ("b", MegabytesPerSecond::new(5.0))]
        );
    }

    #[test]
    fn test_skip_reason_display() {
        assert_eq!(SkipReason::NoParallelData.to_string(), "no parallel data");
        assert_eq!(
            SkipReason::InsufficientThreadVariety.to_string(),
            "insufficient thread-count variety"
        );
        assert_eq!(SkipReason::SingleRunOnly.to_string(), "single run only");
    }
}
