//! Flattened CSV output.
//!
//! Each record expands into one row per `(medicine_id, symptom_id)` pair, so a
//! record with an empty medicine or symptom list produces no rows. Identifier
//! columns are shifted to 1-based values on output.

use std::io::Write;

use chrono::{Local, NaiveDateTime};
use rand::Rng;
use tracing::info;

use dummymaker_contracts::{
    error::{DummyError, DummyResult},
    record::DummyRecord,
};
use dummymaker_core::traits::RecordSink;

/// Column order of the CSV dataset.
pub const CSV_HEADER: [&str; 12] = [
    "id",
    "medicine_id",
    "symptom_id",
    "symptom_orthographical_variant_id",
    "hit",
    "evaluation",
    "shop_id",
    "patient_id",
    "age",
    "gender",
    "note",
    "created_at",
];

/// Value of the `shop_id` column on every row.
pub const SHOP_ID: &str = "myownshop";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn write_failed(e: impl std::fmt::Display) -> DummyError {
    DummyError::OutputWriteFailed {
        reason: format!("csv: {e}"),
    }
}

/// Streams records as CSV rows.
///
/// The header is written on construction. `hit` is filled from `rng` with a
/// uniform 0/1 placeholder.
pub struct CsvDatasetWriter<W: Write, R> {
    writer: csv::Writer<W>,
    rng: R,
    clock: fn() -> NaiveDateTime,
    rows_written: u64,
}

impl<W: Write, R: Rng> CsvDatasetWriter<W, R> {
    pub fn new(inner: W, rng: R) -> DummyResult<Self> {
        let mut writer = csv::WriterBuilder::new().delimiter(b',').from_writer(inner);
        writer.write_record(CSV_HEADER).map_err(write_failed)?;
        Ok(Self {
            writer,
            rng,
            clock: local_now,
            rows_written: 0,
        })
    }

    /// Replace the local wall clock used for `created_at`.
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> DummyResult<W> {
        self.writer.into_inner().map_err(|e| write_failed(e.error()))
    }
}

impl<W: Write, R: Rng> RecordSink for CsvDatasetWriter<W, R> {
    fn accept(&mut self, record: &DummyRecord) -> DummyResult<()> {
        let id = record.id.to_string();
        let patient_id = (record.patient_id + 1).to_string();
        let age = record.age.to_string();
        let gender = record.gender.to_string();

        for medicine_id in &record.medicine_id {
            let medicine_id = (medicine_id + 1).to_string();
            for symptom_id in &record.symptom_id {
                let symptom_id = (symptom_id + 1).to_string();
                let hit = self.rng.gen_range(0..2u8).to_string();
                let created_at = (self.clock)().format(TIMESTAMP_FORMAT).to_string();
                self.writer
                    .write_record([
                        id.as_str(),
                        medicine_id.as_str(),
                        symptom_id.as_str(),
                        "",
                        hit.as_str(),
                        "",
                        SHOP_ID,
                        patient_id.as_str(),
                        age.as_str(),
                        gender.as_str(),
                        "",
                        created_at.as_str(),
                    ])
                    .map_err(write_failed)?;
                self.rows_written += 1;
            }
        }
        Ok(())
    }

    fn finish(&mut self) -> DummyResult<()> {
        self.writer.flush().map_err(write_failed)?;
        info!(rows = self.rows_written, "csv dataset written");
        Ok(())
    }
}
