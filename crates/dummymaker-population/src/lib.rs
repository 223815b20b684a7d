//! # dummymaker-population
//!
//! The population-sampling subsystem.
//!
//! - [`tables`] parses the tab-separated patient-incidence and population
//!   tables.
//! - [`pool`] scales them into a weighted pool of `(gender, age)` records and
//!   dispenses synthetic patients with unique identifiers.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use dummymaker_population::{PatientIncidenceTable, PopulationPool, PopulationTable};
//!
//! let incidence =
//!     PatientIncidenceTable::from_file(Path::new("resources/japan_patient_stats.tsv"))?;
//! let population = PopulationTable::from_file(Path::new("resources/japan_population_stats.tsv"))?;
//! let mut pool = PopulationPool::build(&incidence, &population, 126_933_000, rng)?;
//! let (patient_id, record) = pool.draw_one()?;
//! ```

pub mod pool;
pub mod tables;

pub use pool::{PoolComposition, PopulationPool, DEFAULT_MAX_ID_ATTEMPTS, DEFAULT_TARGET_POPULATION};
pub use tables::{
    IncidenceRate, PatientIncidenceTable, PopulationBucket, PopulationTable, MAX_AGE,
};

// ── Tests ─────────────────────────────────────────────────────────────────────
