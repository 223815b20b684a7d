//! Nested JSON output: `{"records": [...]}` with one object per record.

use std::io::Write;

use serde::Serialize;
use tracing::info;

use dummymaker_contracts::{
    error::{DummyError, DummyResult},
    record::DummyRecord,
};
use dummymaker_core::traits::RecordSink;

#[derive(Serialize)]
struct DatasetDocument<'a> {
    records: &'a [DummyRecord],
}

/// Buffers records and writes the whole document on `finish`.
pub struct JsonDatasetWriter<W: Write> {
    writer: W,
    records: Vec<DummyRecord>,
}

impl<W: Write> JsonDatasetWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            records: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for JsonDatasetWriter<W> {
    fn accept(&mut self, record: &DummyRecord) -> DummyResult<()> {
        self.records.push(record.clone());
        Ok(())
    }

    fn finish(&mut self) -> DummyResult<()> {
        let document = DatasetDocument {
            records: &self.records,
        };
        serde_json::to_writer_pretty(&mut self.writer, &document).map_err(|e| {
            DummyError::OutputWriteFailed {
                reason: format!("json: {e}"),
            }
        })?;
        self.writer.flush().map_err(|e| DummyError::OutputWriteFailed {
            reason: format!("json: {e}"),
        })?;

        info!(records = self.records.len(), "json dataset written");
        Ok(())
    }
}
