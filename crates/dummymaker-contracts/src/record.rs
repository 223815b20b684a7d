//! Demographic and output record types.
//!
//! `AgeGenderRecord` is the unit stored in the weighted population pool.
//! `DummyRecord` is one synthetic report as produced by the generator and
//! consumed by the output writers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Patient gender. Only the two categories present in the statistics
/// tables are modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Both genders, in the order pool buckets are expanded.
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    /// Numeric code written to the dataset: 1 for male, 2 for female.
    pub fn code(self) -> u8 {
        match self {
            Gender::Male => 1,
            Gender::Female => 2,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => f.write_str("male"),
            Gender::Female => f.write_str("female"),
        }
    }
}

/// One (gender, age) entry of the weighted population pool.
///
/// Records are plain values; the pool hands out copies and never mutates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgeGenderRecord {
    pub gender: Gender,
    pub age: u32,
}

impl AgeGenderRecord {
    pub fn new(gender: Gender, age: u32) -> Self {
        Self { gender, age }
    }
}

/// A single synthetic medicine-purchase / symptom report.
///
/// Identifier lists hold the raw sampled values (0-based). The CSV writer
/// shifts them to 1-based on output; the JSON writer emits them unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DummyRecord {
    /// 1-based position of the record within the run.
    pub id: u64,
    /// Distinct medicine indices, in first-sampled order.
    pub medicine_id: Vec<u64>,
    /// Unique synthetic patient identifier in `[1, target_population]`.
    pub patient_id: u64,
    /// Gender code, see [`Gender::code`].
    pub gender: u8,
    pub age: u32,
    /// Distinct symptom indices, in first-sampled order.
    pub symptom_id: Vec<u64>,
}
