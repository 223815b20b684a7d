//! # dummymaker-output
//!
//! Serializers for generated datasets.
//!
//! ## Overview
//!
//! Both writers implement [`RecordSink`](dummymaker_core::traits::RecordSink):
//!
//! - [`CsvDatasetWriter`] streams one row per `(record, medicine, symptom)`
//!   combination.
//! - [`JsonDatasetWriter`] emits `{"records": [...]}` with one object per
//!   record.
//!
//! [`write_dataset`] resolves the configured `writeForm`, creates the output
//! file, and replays records into the matching writer. The format is checked
//! before the file is created, so an unsupported value leaves nothing behind.

use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use rand::Rng;
use tracing::info;

use dummymaker_contracts::{
    config::OutputFormat,
    error::{DummyError, DummyResult},
    record::DummyRecord,
};
use dummymaker_core::traits::RecordSink;

pub mod csv_writer;
pub mod json_writer;

pub use csv_writer::{CsvDatasetWriter, CSV_HEADER, SHOP_ID};
pub use json_writer::JsonDatasetWriter;

/// Write `records` into `output_dir` in the format named by `write_form`.
///
/// Returns the path of the written file (`data.csv` or `data.json`).
///
/// # Errors
///
/// `DummyError::ConfigError` naming `write_form` when it is not a supported
/// format; `DummyError::OutputWriteFailed` when the file cannot be created or
/// written.
pub fn write_dataset<R: Rng>(
    records: &[DummyRecord],
    write_form: &str,
    output_dir: &Path,
    hit_rng: R,
) -> DummyResult<PathBuf> {
    let format = OutputFormat::parse(write_form)?;
    let path = output_dir.join(format.file_name());

    let file = File::create(&path).map_err(|e| DummyError::OutputWriteFailed {
        reason: format!("failed to create '{}': {}", path.display(), e),
    })?;
    let writer = BufWriter::new(file);

    match format {
        OutputFormat::Csv => replay(records, &mut CsvDatasetWriter::new(writer, hit_rng)?)?,
        OutputFormat::Json => replay(records, &mut JsonDatasetWriter::new(writer))?,
    }

    info!(
        path = %path.display(),
        format = %format,
        records = records.len(),
        "dataset written"
    );
    Ok(path)
}

fn replay(records: &[DummyRecord], sink: &mut dyn RecordSink) -> DummyResult<()> {
    for record in records {
        sink.accept(record)?;
    }
    sink.finish()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
