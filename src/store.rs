use std::fs::File;
use std::path::Path;

use crate::elements::{BenchmarkRecord, Dataset};
use crate::error::RecordError;

/// Loads benchmark records from a CSV source with a header row.
///
/// Columns are matched by header name, so column order does not matter and columns other than
/// the benchmark record fields are ignored.
#[derive(Debug, Default, Copy, Clone)]
pub struct RecordStore;

impl RecordStore {
    #[tracing::instrument(level = "debug", skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Dataset, RecordError> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|source| RecordError::DataUnavailable { path: path.to_path_buf(), source })?;
        let mut reader = csv::Reader::from_reader(file);

        tracing::trace!("loading benchmark records from CSV...");
        let headers = reader.headers().map_err(|err| RecordError::from_csv(path, err))?.clone();

        let mut records: Vec<BenchmarkRecord> = vec![];
        for row in reader.records() {
            let row = row.map_err(|err| RecordError::from_csv(path, err))?;
            let record: BenchmarkRecord = row
                .deserialize(Some(&headers))
                .map_err(|err| RecordError::from_csv(path, err))?;

            if let Err(reason) = record.validate() {
                let line = row.position().map(|p| p.line()).unwrap_or_default();
                return Err(RecordError::InvalidRecord { path: path.to_path_buf(), line, reason });
            }

            records.push(record);
        }

        tracing::debug!("deserialized {} benchmark records from CSV.", records.len());
        Ok(Dataset::new(records))
    }
}
