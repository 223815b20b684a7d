//! The weighted population pool.
//!
//! At construction every population bucket is scaled to the target
//! population and multiplied by the matching incidence rate:
//!
//! ```text
//! scaled   = target_population × bucket_count / grand_total
//! patients = trunc(scaled × incidence_rate / 100_000)
//! ```
//!
//! `patients` copies of `{gender, age}` are appended, male before female, in
//! population-table order. The pool never changes size afterwards.
//!
//! Draws walk a shuffled copy of the pool from the back. When the cursor
//! reaches the front, the whole pool is reshuffled and a new epoch begins, so
//! demographic records repeat across epochs. Patient identifiers never
//! repeat: each is drawn uniformly from `[1, target_population]` and resampled
//! until unseen, up to an attempt limit.

use std::collections::HashSet;

use rand::{seq::SliceRandom, Rng};
use tracing::{debug, info};

use dummymaker_contracts::{
    error::{DummyError, DummyResult},
    record::{AgeGenderRecord, Gender},
};
use dummymaker_core::traits::PatientSource;

use crate::tables::{PatientIncidenceTable, PopulationTable};

/// Population of Japan, the default scale of the synthetic population.
pub const DEFAULT_TARGET_POPULATION: u64 = 126_933_000;

/// Default number of identifier draws before a single `draw_one` gives up.
pub const DEFAULT_MAX_ID_ATTEMPTS: u32 = 1_000_000;

/// Incidence rates are expressed per this many people.
const INCIDENCE_BASE: f64 = 100_000.0;

/// Pool size broken down by gender.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolComposition {
    pub male: usize,
    pub female: usize,
}

/// A finite, weighted multiset of `(gender, age)` records that dispenses
/// synthetic patients with never-repeated identifiers.
pub struct PopulationPool<R> {
    pool: Vec<AgeGenderRecord>,
    /// Records at `[0, cursor)` are still undrawn in the current epoch.
    cursor: usize,
    epoch: u64,
    issued: HashSet<u64>,
    target_population: u64,
    grand_total: u64,
    max_id_attempts: u32,
    rng: R,
}

impl<R: Rng> PopulationPool<R> {
    /// Build the pool from the two tables.
    ///
    /// Returns `DummyError::ConfigError` if `target_population` is zero, the
    /// population table sums to zero, or a population age has no incidence
    /// entry.
    pub fn build(
        incidence: &PatientIncidenceTable,
        population: &PopulationTable,
        target_population: u64,
        rng: R,
    ) -> DummyResult<Self> {
        if target_population == 0 {
            return Err(DummyError::ConfigError {
                reason: "target population must be at least 1".to_string(),
            });
        }

        let grand_total = population.grand_total();
        if grand_total == 0 {
            return Err(DummyError::ConfigError {
                reason: "population table has no counts to scale".to_string(),
            });
        }

        let mut pool = Vec::new();
        for bucket in population.buckets() {
            let rate = incidence.get(bucket.age).ok_or_else(|| DummyError::ConfigError {
                reason: format!("no incidence entry for population age {}", bucket.age),
            })?;

            for gender in Gender::ALL {
                let scaled =
                    target_population as f64 * bucket.count(gender) as f64 / grand_total as f64;
                let expected = scaled * rate.for_gender(gender) as f64 / INCIDENCE_BASE;
                let copies = expected as usize;
                pool.extend(
                    std::iter::repeat(AgeGenderRecord::new(gender, bucket.age)).take(copies),
                );
            }
        }

        info!(
            pool_size = pool.len(),
            grand_total,
            target_population,
            buckets = population.buckets().len(),
            "population pool built"
        );

        Ok(Self {
            pool,
            cursor: 0,
            epoch: 0,
            issued: HashSet::new(),
            target_population,
            grand_total,
            max_id_attempts: DEFAULT_MAX_ID_ATTEMPTS,
            rng,
        })
    }

    /// Override the number of identifier draws `draw_one` makes before
    /// failing with `ResourceExhausted`.
    pub fn with_max_id_attempts(mut self, attempts: u32) -> Self {
        self.max_id_attempts = attempts.max(1);
        self
    }

    /// Number of records in the pool. Fixed after construction.
    pub fn size(&self) -> usize {
        self.pool.len()
    }

    pub fn grand_total(&self) -> u64 {
        self.grand_total
    }

    pub fn target_population(&self) -> u64 {
        self.target_population
    }

    /// Number of identifiers handed out so far.
    pub fn issued_count(&self) -> usize {
        self.issued.len()
    }

    /// Number of shuffles performed so far.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn composition(&self) -> PoolComposition {
        self.pool.iter().fold(PoolComposition::default(), |mut acc, r| {
            match r.gender {
                Gender::Male => acc.male += 1,
                Gender::Female => acc.female += 1,
            }
            acc
        })
    }

    /// Draw one `(patient_id, record)` pair.
    ///
    /// # Errors
    ///
    /// `DummyError::ResourceExhausted` when the pool is empty, when every
    /// identifier in `[1, target_population]` has been issued, or when
    /// `max_id_attempts` consecutive draws all hit issued identifiers.
    pub fn draw_one(&mut self) -> DummyResult<(u64, AgeGenderRecord)> {
        if self.pool.is_empty() {
            return Err(DummyError::ResourceExhausted {
                reason: "population pool is empty; no (gender, age) records to draw".to_string(),
            });
        }
        if self.issued.len() as u64 >= self.target_population {
            return Err(DummyError::ResourceExhausted {
                reason: format!(
                    "all {} patient identifiers have been issued",
                    self.target_population
                ),
            });
        }

        if self.cursor == 0 {
            self.pool.shuffle(&mut self.rng);
            self.cursor = self.pool.len();
            self.epoch += 1;
            debug!(epoch = self.epoch, pool_size = self.pool.len(), "population pool reshuffled");
        }

        let patient_id = self.fresh_identifier()?;

        self.cursor -= 1;
        Ok((patient_id, self.pool[self.cursor]))
    }

    fn fresh_identifier(&mut self) -> DummyResult<u64> {
        for _ in 0..self.max_id_attempts {
            let candidate = self.rng.gen_range(1..=self.target_population);
            if self.issued.insert(candidate) {
                return Ok(candidate);
            }
        }
        Err(DummyError::ResourceExhausted {
            reason: format!(
                "no unused patient identifier found in {} attempts ({} of {} issued)",
                self.max_id_attempts,
                self.issued.len(),
                self.target_population
            ),
        })
    }
}

impl<R: Rng> PatientSource for PopulationPool<R> {
    fn draw_one(&mut self) -> DummyResult<(u64, AgeGenderRecord)> {
        PopulationPool::draw_one(self)
    }
}
