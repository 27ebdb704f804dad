use either::{Either, Left};
use thiserror::Error;

use super::ErrorLabel;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("cannot summarize throughput of an empty dataset")]
    EmptyDataset,

    #[error("baseline algorithm {algorithm} has zero mean throughput - speedup is undefined")]
    DivisionByZero { algorithm: String },

    #[error("throughput of {algorithm} relative to baseline {baseline} is not finite")]
    NonFiniteSpeedup { algorithm: String, baseline: String },
}

impl ErrorLabel for AnalysisError {
    fn slug(&self) -> String {
        "analysis".into()
    }

    fn next(&self) -> Either<String, Box<&dyn ErrorLabel>> {
        match self {
            Self::EmptyDataset => Left("empty_dataset".into()),
            Self::DivisionByZero { .. } => Left("division_by_zero".into()),
            Self::NonFiniteSpeedup { .. } => Left("non_finite_speedup".into()),
        }
    }
}
