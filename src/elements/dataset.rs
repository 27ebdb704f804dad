use std::fmt;

use itertools::Itertools;

use super::{BenchmarkRecord, Timestamp};

/// Benchmark records in load order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset(Vec<BenchmarkRecord>);

impl Dataset {
    pub fn new(records: Vec<BenchmarkRecord>) -> Self {
        Self(records)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BenchmarkRecord> {
        self.0.iter()
    }

    pub fn records(&self) -> &[BenchmarkRecord] {
        self.0.as_slice()
    }

    /// Timestamp of the latest run, or `None` for an empty dataset.
    pub fn latest_timestamp(&self) -> Option<Timestamp> {
        self.0.iter().map(|r| r.timestamp).max()
    }

    pub fn distinct_timestamps(&self) -> usize {
        self.0.iter().map(|r| r.timestamp).unique().count()
    }

    /// Distinct algorithm names in order of first appearance.
    pub fn algorithms(&self) -> Vec<&str> {
        self.0.iter().map(|r| r.algorithm.as_str()).unique().collect()
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Dataset[records:{} runs:{} algorithms:{}]",
            self.len(),
            self.distinct_timestamps(),
            self.algorithms().len()
        )
    }
}

impl From<Vec<BenchmarkRecord>> for Dataset {
    fn from(records: Vec<BenchmarkRecord>) -> Self {
        Self(records)
    }
}

impl FromIterator<BenchmarkRecord> for Dataset {
    fn from_iter<I: IntoIterator<Item = BenchmarkRecord>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a BenchmarkRecord;
    type IntoIter = std::slice::Iter<'a, BenchmarkRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_dataset_run_queries() {
        let dataset: Dataset = vec![
            BenchmarkRecord::new(100, "SHA-256", 1, 50.0),
            BenchmarkRecord::new(200, "BlitzHash", 1, 210.0),
            BenchmarkRecord::new(100, "BlitzHash", 1, 200.0),
        ]
        .into_iter()
        .collect();

        assert_eq!(dataset.latest_timestamp(), Some(Timestamp::from_secs(200)));
        assert_eq!(dataset.distinct_timestamps(), 2);
        assert_eq!(dataset.algorithms(), vec!["SHA-256", "BlitzHash"]);
        assert_eq!(Dataset::default().latest_timestamp(), None);
    }
}
