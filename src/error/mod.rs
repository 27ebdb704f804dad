use either::{Either, Right};
use thiserror::Error;

mod analysis_errors;
mod record_errors;
mod render_errors;
mod settings_errors;

pub use analysis_errors::AnalysisError;
pub use record_errors::RecordError;
pub use render_errors::RenderError;
pub use settings_errors::SettingsError;

/// Dotted classification of an error, e.g. `benchviz::records::data_unavailable`, recorded as a
/// structured field alongside error events.
pub trait ErrorLabel {
    fn label(&self) -> String {
        match self.next() {
            Either::Right(n) => format!("{}::{}", self.slug(), n.label()),
            Either::Left(ls) => format!("{}::{}", self.slug(), ls),
        }
    }

    fn slug(&self) -> String;
    fn next(&self) -> Either<String, Box<&dyn ErrorLabel>>;
}

#[derive(Debug, Error)]
pub enum BenchVizError {
    #[error("{0}")]
    Records(#[from] RecordError),

    #[error("{0}")]
    Analysis(#[from] AnalysisError),

    #[error("{0}")]
    Render(#[from] RenderError),

    #[error("{0}")]
    Settings(#[from] SettingsError),
}

impl ErrorLabel for BenchVizError {
    fn slug(&self) -> String {
        "benchviz".into()
    }

    fn next(&self) -> Either<String, Box<&dyn ErrorLabel>> {
        match self {
            Self::Records(e) => Right(Box::new(e)),
            Self::Analysis(e) => Right(Box::new(e)),
            Self::Render(e) => Right(Box::new(e)),
            Self::Settings(e) => Right(Box::new(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    #[test]
    fn test_error_label_descends_into_cause() {
        let error: BenchVizError = AnalysisError::EmptyDataset.into();
        assert_eq!(error.label(), "benchviz::analysis::empty_dataset");

        let error: BenchVizError = RecordError::InvalidRecord {
            path: PathBuf::from("bench_results.csv"),
            line: 3,
            reason: "empty algorithm".to_string(),
        }
        .into();
        assert_eq!(error.label(), "benchviz::records::invalid_record");
    }
}
