//! Tab-separated statistics tables.
//!
//! Two tables feed the population pool:
//!
//! - **Patient incidence**: one row per age bracket. The `age` column holds an
//!   inclusive range `"start~end"`; `gmal` and `gfem` hold the male and female
//!   patient counts per 100,000 people. Brackets are exploded into one entry
//!   per single age at load time.
//! - **Population**: one row per single age. `male` and `female` hold
//!   relative head counts; only their proportions matter.
//!
//! Columns not listed above are ignored, so the tables may carry extra
//! statistics alongside the ones used here.

use std::{collections::BTreeMap, io::Read, path::Path};

use serde::Deserialize;
use tracing::debug;

use dummymaker_contracts::{
    error::{DummyError, DummyResult},
    record::Gender,
};

// ── Raw rows ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct IncidenceRow {
    age: String,
    gmal: u64,
    gfem: u64,
}

#[derive(Debug, Deserialize)]
struct PopulationRow {
    age: String,
    male: u64,
    female: u64,
}

fn tsv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

fn read_rows<T, R>(reader: R, table: &str) -> DummyResult<Vec<T>>
where
    T: for<'de> Deserialize<'de>,
    R: Read,
{
    tsv_reader(reader)
        .into_deserialize()
        .enumerate()
        .map(|(idx, row)| {
            row.map_err(|e| DummyError::TableLoad {
                reason: format!("{table} table, data row {}: {}", idx + 1, e),
            })
        })
        .collect()
}

fn open_table(path: &Path, table: &str) -> DummyResult<std::fs::File> {
    std::fs::File::open(path).map_err(|e| DummyError::TableLoad {
        reason: format!("failed to open {table} table '{}': {}", path.display(), e),
    })
}

fn parse_age(raw: &str, table: &str) -> DummyResult<u32> {
    raw.trim().parse::<u32>().map_err(|e| DummyError::TableLoad {
        reason: format!("{table} table: invalid age '{raw}': {e}"),
    })
}

/// Highest age an incidence bracket may reach.
pub const MAX_AGE: u32 = 150;

// ── Patient incidence ─────────────────────────────────────────────────────────

/// Per-100,000 patient rates for one age.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncidenceRate {
    pub male: u64,
    pub female: u64,
}

impl IncidenceRate {
    pub fn for_gender(&self, gender: Gender) -> u64 {
        match gender {
            Gender::Male => self.male,
            Gender::Female => self.female,
        }
    }
}

/// Patient incidence keyed by single age.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientIncidenceTable {
    rates: BTreeMap<u32, IncidenceRate>,
}

impl PatientIncidenceTable {
    /// Parse an incidence table from any reader of tab-separated text.
    ///
    /// When brackets overlap, the later row wins for the shared ages.
    pub fn from_reader<R: Read>(reader: R) -> DummyResult<Self> {
        let rows: Vec<IncidenceRow> = read_rows(reader, "incidence")?;
        let mut rates = BTreeMap::new();

        for row in rows {
            let (start, end) = parse_age_range(&row.age)?;
            let rate = IncidenceRate { male: row.gmal, female: row.gfem };
            for age in start..=end {
                rates.insert(age, rate);
            }
        }

        debug!(ages = rates.len(), "incidence table loaded");
        Ok(Self { rates })
    }

    pub fn from_tsv_str(s: &str) -> DummyResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    pub fn from_file(path: &Path) -> DummyResult<Self> {
        Self::from_reader(open_table(path, "incidence")?)
    }

    /// Rates for `age`, if the table covers it.
    pub fn get(&self, age: u32) -> Option<IncidenceRate> {
        self.rates.get(&age).copied()
    }

    /// Number of single ages covered.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// Parse `"start~end"` into an inclusive range. A bare age is accepted as a
/// one-year bracket.
fn parse_age_range(raw: &str) -> DummyResult<(u32, u32)> {
    let (start, end) = match raw.split_once('~') {
        Some((start, end)) => (parse_age(start, "incidence")?, parse_age(end, "incidence")?),
        None => {
            let age = parse_age(raw, "incidence")?;
            (age, age)
        }
    };
    if start > end {
        return Err(DummyError::TableLoad {
            reason: format!("incidence table: age range '{raw}' ends before it starts"),
        });
    }
    if end > MAX_AGE {
        return Err(DummyError::TableLoad {
            reason: format!("incidence table: age range '{raw}' goes beyond age {MAX_AGE}"),
        });
    }
    Ok((start, end))
}

// ── Population ────────────────────────────────────────────────────────────────

/// One age bucket of the population table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopulationBucket {
    pub age: u32,
    pub male: u64,
    pub female: u64,
}

impl PopulationBucket {
    pub fn count(&self, gender: Gender) -> u64 {
        match gender {
            Gender::Male => self.male,
            Gender::Female => self.female,
        }
    }
}

/// Relative population counts per age, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopulationTable {
    buckets: Vec<PopulationBucket>,
    grand_total: u64,
}

impl PopulationTable {
    pub fn from_reader<R: Read>(reader: R) -> DummyResult<Self> {
        let rows: Vec<PopulationRow> = read_rows(reader, "population")?;
        let buckets = rows
            .into_iter()
            .map(|row| {
                Ok(PopulationBucket {
                    age: parse_age(&row.age, "population")?,
                    male: row.male,
                    female: row.female,
                })
            })
            .collect::<DummyResult<Vec<_>>>()?;

        let grand_total = buckets
            .iter()
            .try_fold(0u64, |total, b| total.checked_add(b.male)?.checked_add(b.female))
            .ok_or_else(|| DummyError::TableLoad {
                reason: "population table: counts overflow a 64-bit total".to_string(),
            })?;

        debug!(buckets = buckets.len(), grand_total, "population table loaded");
        Ok(Self { buckets, grand_total })
    }

    pub fn from_tsv_str(s: &str) -> DummyResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    pub fn from_file(path: &Path) -> DummyResult<Self> {
        Self::from_reader(open_table(path, "population")?)
    }

    pub fn buckets(&self) -> &[PopulationBucket] {
        &self.buckets
    }

    /// Sum of all counts, both genders, across every bucket.
    pub fn grand_total(&self) -> u64 {
        self.grand_total
    }
}
