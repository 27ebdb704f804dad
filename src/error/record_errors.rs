use std::path::PathBuf;

use either::{Either, Left};
use thiserror::Error;

use super::ErrorLabel;

/// Command the operator can run to (re)generate the benchmark results file.
pub const REGENERATE_HINT: &str = "cargo run --release --bin bench";

/// Set of errors occurring while loading benchmark records. All of them halt the pipeline.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The results source does not exist or could not be read.
    #[error("benchmark results unavailable at {}: {source}", .path.display())]
    DataUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A row could not be parsed into a benchmark record.
    #[error("malformed benchmark results in {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("invalid benchmark record at line {line} of {}: {reason}", .path.display())]
    InvalidRecord { path: PathBuf, line: u64, reason: String },
}

impl RecordError {
    pub(crate) fn from_csv(path: impl Into<PathBuf>, error: csv::Error) -> Self {
        let path = path.into();
        if error.is_io_error() {
            Self::DataUnavailable {
                path,
                source: std::io::Error::new(std::io::ErrorKind::Other, error),
            }
        } else {
            Self::Malformed { path, source: error }
        }
    }

    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::DataUnavailable { path, .. } | Self::Malformed { path, .. } | Self::InvalidRecord { path, .. } => {
                path.as_path()
            },
        }
    }

    /// Operator guidance on how to recover from the failure.
    pub fn guidance(&self) -> String {
        match self {
            Self::DataUnavailable { .. } => format!("Run benchmarks first: {}", REGENERATE_HINT),
            Self::Malformed { .. } | Self::InvalidRecord { .. } => format!(
                "Check the file against the timestamp,algorithm,threads,mb_s schema or regenerate it: {}",
                REGENERATE_HINT
            ),
        }
    }
}

impl ErrorLabel for RecordError {
    fn slug(&self) -> String {
        "records".into()
    }

    fn next(&self) -> Either<String, Box<&dyn ErrorLabel>> {
        match self {
            Self::DataUnavailable { .. } => Left("data_unavailable".into()),
            Self::Malformed { .. } => Left("malformed".into()),
            Self::InvalidRecord { .. } => Left("invalid_record".into()),
        }
    }
}
