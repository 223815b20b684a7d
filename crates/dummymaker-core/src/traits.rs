//! Seams between the generation loop and its collaborators.
//!
//! - `PatientSource`: dispenses one synthetic patient per record
//! - `RecordSink`: receives every generated record, in order
//!
//! The generator only talks to these traits, so the population model and the
//! output format can be swapped or mocked independently.

use dummymaker_contracts::{
    error::DummyResult,
    record::{AgeGenderRecord, DummyRecord},
};

/// A source of synthetic patients.
///
/// Every successful call returns an identifier that the source has never
/// returned before, paired with a demographic record.
pub trait PatientSource {
    /// Draw the next `(patient_id, record)` pair.
    ///
    /// Fails with `DummyError::ResourceExhausted` once no fresh identifier
    /// can be produced.
    fn draw_one(&mut self) -> DummyResult<(u64, AgeGenderRecord)>;
}

/// A consumer of generated records.
///
/// `accept` is called once per record in id order; `finish` is called exactly
/// once after the last record, even when zero records were generated.
pub trait RecordSink {
    fn accept(&mut self, record: &DummyRecord) -> DummyResult<()>;

    /// Flush or seal the output.
    fn finish(&mut self) -> DummyResult<()>;
}

/// A sink that keeps every record in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Vec<DummyRecord>,
    finished: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn records(&self) -> &[DummyRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<DummyRecord> {
        self.records
    }
}

impl RecordSink for MemorySink {
    fn accept(&mut self, record: &DummyRecord) -> DummyResult<()> {
        self.records.push(record.clone());
        Ok(())
    }

    fn finish(&mut self) -> DummyResult<()> {
        self.finished = true;
        Ok(())
    }
}
