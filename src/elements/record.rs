use serde::Deserialize;

use super::{MegabytesPerSecond, Timestamp};

/// One benchmark measurement: a single algorithm at a single thread count in a single run.
///
/// Columns are matched by header name. `chunk`, `size` and `seed` describe the workload the
/// harness hashed and are carried when the source provides them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BenchmarkRecord {
    pub timestamp: Timestamp,
    pub algorithm: String,
    pub threads: u32,
    pub mb_s: MegabytesPerSecond,

    #[serde(default)]
    pub chunk: Option<u64>,

    #[serde(default)]
    pub size: Option<u64>,

    #[serde(default)]
    pub seed: Option<u64>,
}

impl BenchmarkRecord {
    pub fn new(
        timestamp: impl Into<Timestamp>, algorithm: impl Into<String>, threads: u32, mb_s: impl Into<MegabytesPerSecond>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            algorithm: algorithm.into(),
            threads,
            mb_s: mb_s.into(),
            chunk: None,
            size: None,
            seed: None,
        }
    }

    /// Checks the record against the dataset invariant, describing the first violation found.
    pub fn validate(&self) -> Result<(), String> {
        if self.algorithm.trim().is_empty() {
            return Err("algorithm must not be empty".to_string());
        }

        if self.threads == 0 {
            return Err(format!("threads must be at least 1 for {}", self.algorithm));
        }

        let mb_s = self.mb_s.as_f64();
        if !mb_s.is_finite() || mb_s < 0.0 {
            return Err(format!(
                "mb_s must be a finite, non-negative throughput for {} but was {}",
                self.algorithm, mb_s
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claim::{assert_err, assert_ok};

    #[test]
    fn test_validate_record() {
        assert_ok!(BenchmarkRecord::new(100, "SHA-256", 1, 50.0).validate());
        assert_ok!(BenchmarkRecord::new(100, "SHA-256", 1, 0.0).validate());
        assert_err!(BenchmarkRecord::new(100, "  ", 1, 50.0).validate());
        assert_err!(BenchmarkRecord::new(100, "BlitzHash-MT", 0, 50.0).validate());
        assert_err!(BenchmarkRecord::new(100, "SHA-256", 1, -1.0).validate());
        assert_err!(BenchmarkRecord::new(100, "SHA-256", 1, f64::NAN).validate());
        assert_err!(BenchmarkRecord::new(100, "SHA-256", 1, f64::INFINITY).validate());
    }
}
