use std::path::PathBuf;

use either::{Either, Left};
use thiserror::Error;

use super::ErrorLabel;
use crate::elements::Timestamp;

/// Set of errors occurring while rendering a chart. Each is fatal only for the chart at hand.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to prepare chart destination {}: {source}", .path.display())]
    Destination {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to draw chart {}: {message}", .path.display())]
    Drawing { path: PathBuf, message: String },

    #[error("{axis} axis of chart {} cannot span non-finite values", .path.display())]
    NonFiniteAxis { path: PathBuf, axis: String },

    #[error("timestamp {0:#} cannot be placed on a calendar axis")]
    TimestampOutOfRange(Timestamp),

    #[error("failed to write to console: {0}")]
    Console(#[from] std::io::Error),
}

impl ErrorLabel for RenderError {
    fn slug(&self) -> String {
        "render".into()
    }

    fn next(&self) -> Either<String, Box<&dyn ErrorLabel>> {
        match self {
            Self::Destination { .. } => Left("destination".into()),
            Self::Drawing { .. } => Left("drawing".into()),
            Self::NonFiniteAxis { .. } => Left("non_finite_axis".into()),
            Self::TimestampOutOfRange(_) => Left("timestamp".into()),
            Self::Console(_) => Left("console".into()),
        }
    }
}
