//! The dataset generator: the record assembly loop.
//!
//! For each synthetic record id `1..=record_count` the generator:
//!
//!   medicine sampler → patient source → symptom sampler → sink
//!
//! and hands the assembled `DummyRecord` to a `RecordSink`. The generator owns
//! its collaborators exclusively; nothing else touches the patient source or
//! the samplers while a run is in progress.

use rand::Rng;
use tracing::{debug, info};

use dummymaker_contracts::{error::DummyResult, record::DummyRecord};

use crate::{
    sampler::BoundedParetoSampler,
    traits::{MemorySink, PatientSource, RecordSink},
};

/// Upper bound on the number of medicine ids drawn per record.
pub const MEDICINE_UPPER_LIMIT: usize = 20;

/// Upper bound on the number of symptom ids drawn per record.
pub const SYMPTOM_UPPER_LIMIT: usize = 5;

/// Drives a single generation run.
pub struct DatasetGenerator<R> {
    patients: Box<dyn PatientSource>,
    medicine: BoundedParetoSampler<R>,
    symptom: BoundedParetoSampler<R>,
}

impl<R: Rng> DatasetGenerator<R> {
    pub fn new(
        patients: Box<dyn PatientSource>,
        medicine: BoundedParetoSampler<R>,
        symptom: BoundedParetoSampler<R>,
    ) -> Self {
        Self { patients, medicine, symptom }
    }

    /// Assemble the record with synthetic id `id`.
    pub fn next_record(&mut self, id: u64) -> DummyResult<DummyRecord> {
        let medicine_id = self.medicine.sample(MEDICINE_UPPER_LIMIT);
        let (patient_id, demographic) = self.patients.draw_one()?;
        let symptom_id = self.symptom.sample(SYMPTOM_UPPER_LIMIT);

        Ok(DummyRecord {
            id,
            medicine_id,
            patient_id,
            gender: demographic.gender.code(),
            age: demographic.age,
            symptom_id,
        })
    }

    /// Generate `record_count` records into `sink`, then finish the sink.
    ///
    /// Returns the number of records delivered. The first error from the
    /// patient source or the sink aborts the run; `finish` is not called in
    /// that case.
    pub fn run(&mut self, record_count: u64, sink: &mut dyn RecordSink) -> DummyResult<u64> {
        info!(record_count, "generation starting");

        for id in 1..=record_count {
            let record = self.next_record(id)?;
            debug!(
                id,
                patient_id = record.patient_id,
                medicines = record.medicine_id.len(),
                symptoms = record.symptom_id.len(),
                "record generated"
            );
            sink.accept(&record)?;
        }

        sink.finish()?;
        info!(record_count, "generation complete");
        Ok(record_count)
    }

    /// Generate `record_count` records and return them in id order.
    pub fn generate(&mut self, record_count: u64) -> DummyResult<Vec<DummyRecord>> {
        let mut sink = MemorySink::new();
        self.run(record_count, &mut sink)?;
        Ok(sink.into_records())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use dummymaker_contracts::{
        config::DistributionConfig,
        error::DummyError,
        record::{AgeGenderRecord, Gender},
    };

    use super::*;

    // ── Test doubles ─────────────────────────────────────────────────────────

    /// A patient source that hands out sequential ids, alternating genders,
    /// and fails once `capacity` patients have been issued.
    struct SequentialPatients {
        next_id: u64,
        capacity: u64,
    }

    impl SequentialPatients {
        fn new(capacity: u64) -> Self {
            Self { next_id: 1, capacity }
        }
    }

    impl PatientSource for SequentialPatients {
        fn draw_one(&mut self) -> DummyResult<(u64, AgeGenderRecord)> {
            if self.next_id > self.capacity {
                return Err(DummyError::ResourceExhausted {
                    reason: format!("all {} patients issued", self.capacity),
                });
            }
            let id = self.next_id;
            self.next_id += 1;
            let gender = if id % 2 == 1 { Gender::Male } else { Gender::Female };
            Ok((id, AgeGenderRecord::new(gender, 20 + id as u32)))
        }
    }

    /// A sink that fails on the n-th accepted record.
    struct FailingSink {
        fail_at: usize,
        seen: usize,
        finished: bool,
    }

    impl RecordSink for FailingSink {
        fn accept(&mut self, _record: &DummyRecord) -> DummyResult<()> {
            self.seen += 1;
            if self.seen == self.fail_at {
                return Err(DummyError::OutputWriteFailed {
                    reason: "disk full".to_string(),
                });
            }
            Ok(())
        }

        fn finish(&mut self) -> DummyResult<()> {
            self.finished = true;
            Ok(())
        }
    }

    fn generator(seed: u64, capacity: u64) -> DatasetGenerator<ChaCha8Rng> {
        let medicine = BoundedParetoSampler::new(
            "medDistribution",
            &DistributionConfig::new(100, 1.5),
            ChaCha8Rng::seed_from_u64(seed),
        )
        .unwrap();
        let symptom = BoundedParetoSampler::new(
            "sideDistribution",
            &DistributionConfig::new(50, 1.2),
            ChaCha8Rng::seed_from_u64(seed + 1),
        )
        .unwrap();
        DatasetGenerator::new(Box::new(SequentialPatients::new(capacity)), medicine, symptom)
    }

    // ── Tests ────────────────────────────────────────────────────────────────

    #[test]
    fn generate_assigns_one_based_ids_in_order() {
        let records = generator(7, 100).generate(10).unwrap();
        let ids: Vec<u64> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn generate_encodes_gender_and_age_from_source() {
        let records = generator(7, 100).generate(4).unwrap();
        assert_eq!(records[0].gender, 1);
        assert_eq!(records[1].gender, 2);
        assert_eq!(records[0].age, 21);
        assert_eq!(records[3].age, 24);
    }

    #[test]
    fn generate_respects_list_bounds() {
        let records = generator(11, 500).generate(200).unwrap();
        for record in &records {
            assert!(record.medicine_id.len() <= MEDICINE_UPPER_LIMIT);
            assert!(record.symptom_id.len() <= SYMPTOM_UPPER_LIMIT);
            assert!(record.medicine_id.iter().all(|&m| m < 100));
            assert!(record.symptom_id.iter().all(|&s| s < 50));

            let distinct: HashSet<u64> = record.medicine_id.iter().copied().collect();
            assert_eq!(distinct.len(), record.medicine_id.len());
        }
    }

    #[test]
    fn generate_zero_records_finishes_sink() {
        let mut sink = MemorySink::new();
        let delivered = generator(3, 10).run(0, &mut sink).unwrap();
        assert_eq!(delivered, 0);
        assert!(sink.records().is_empty());
        assert!(sink.is_finished(), "finish must run even for an empty dataset");
    }

    #[test]
    fn generate_is_deterministic_for_fixed_seed() {
        let first = generator(42, 100).generate(5).unwrap();
        let second = generator(42, 100).generate(5).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn run_propagates_patient_exhaustion() {
        let mut sink = MemorySink::new();
        let result = generator(5, 3).run(4, &mut sink);
        assert!(matches!(result, Err(DummyError::ResourceExhausted { .. })));
        assert_eq!(sink.records().len(), 3);
        assert!(!sink.is_finished());
    }

    #[test]
    fn run_stops_at_first_sink_error() {
        let mut sink = FailingSink { fail_at: 2, seen: 0, finished: false };
        let result = generator(5, 10).run(5, &mut sink);
        assert!(matches!(result, Err(DummyError::OutputWriteFailed { .. })));
        assert_eq!(sink.seen, 2);
        assert!(!sink.finished);
    }
}
