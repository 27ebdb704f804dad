use itertools::Itertools;

use super::{Analysis, SkipReason};
use crate::elements::{Dataset, MegabytesPerSecond, Timestamp};

/// Throughput observations of one algorithm, ascending by run timestamp.
///
/// Observations sharing a timestamp are kept as separate points rather than averaged.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    pub algorithm: String,
    pub points: Vec<(Timestamp, MegabytesPerSecond)>,
}

/// Per-algorithm time series, in order of each algorithm's first appearance in the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    pub series: Vec<TimeSeries>,
}

impl History {
    pub fn get(&self, algorithm: &str) -> Option<&TimeSeries> {
        self.series.iter().find(|s| s.algorithm == algorithm)
    }

    /// Earliest and latest timestamps across all series.
    pub fn time_span(&self) -> Option<(Timestamp, Timestamp)> {
        self.series
            .iter()
            .flat_map(|s| s.points.iter().map(|(ts, _)| *ts))
            .minmax()
            .into_option()
    }

    pub fn max_throughput(&self) -> MegabytesPerSecond {
        self.series
            .iter()
            .flat_map(|s| s.points.iter().map(|(_, mb_s)| *mb_s))
            .fold(MegabytesPerSecond::ZERO, MegabytesPerSecond::max)
    }
}

#[derive(Debug, Default, Copy, Clone)]
pub struct HistoryAnalyzer;

impl HistoryAnalyzer {
    #[tracing::instrument(level = "debug", skip(self, dataset), fields(records = dataset.len()))]
    pub fn analyze(&self, dataset: &Dataset) -> Analysis<History> {
        let nr_runs = dataset.distinct_timestamps();
        if nr_runs < 2 {
            tracing::info!(%nr_runs, "performance history requires at least two benchmark runs.");
            return Analysis::Skipped(SkipReason::SingleRunOnly);
        }

        let series = dataset
            .algorithms()
            .into_iter()
            .map(|algorithm| {
                let points = dataset
                    .iter()
                    .filter(|r| r.algorithm == algorithm)
                    .map(|r| (r.timestamp, r.mb_s))
                    .sorted_by_key(|(ts, _)| *ts)
                    .collect();

                TimeSeries { algorithm: algorithm.to_string(), points }
            })
            .collect();

        let history = History { series };
        tracing::debug!(%nr_runs, nr_series=%history.series.len(), "derived performance history.");
        Analysis::Ready(history)
    }
}
