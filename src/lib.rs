pub mod analysis;
pub mod elements;
pub mod error;
pub mod pipeline;
pub mod render;
pub mod settings;
pub mod store;
pub mod tracing;

pub use elements::{BenchmarkRecord, Dataset};
pub use pipeline::{ChartKind, ChartOutcome, Pipeline, PipelineReport};
pub use settings::Settings;
pub use store::RecordStore;

pub type BenchVizResult<T> = Result<T, error::BenchVizError>;
