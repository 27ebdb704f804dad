mod dataset;
mod record;
pub mod throughput;
pub mod timestamp;

pub use dataset::Dataset;
pub use record::BenchmarkRecord;
pub use throughput::MegabytesPerSecond;
pub use timestamp::Timestamp;
