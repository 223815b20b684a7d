//! Run configuration schema.
//!
//! `DatasetConfig` mirrors the JSON configuration document:
//!
//! ```json
//! {
//!   "medDistribution":  { "N": 100, "a": 1.5 },
//!   "sideDistribution": { "N": 50,  "a": 1.2 },
//!   "requiredRecordCount": 1000,
//!   "writeForm": "csv"
//! }
//! ```
//!
//! Distribution parameters are kept optional at the serde layer so that a
//! missing value produces a `ConfigError` naming the distribution rather than
//! a generic deserialization failure. `N` is read as a number, so `100` and
//! `100.0` describe the same bound.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DummyError, DummyResult};

/// `requiredRecordCount` must be strictly below this value.
pub const RECORD_COUNT_LIMIT: u64 = 100_000_009;

/// Default number of records when `requiredRecordCount` is absent.
pub const DEFAULT_RECORD_COUNT: u64 = 1000;

/// Parameters of one bounded Pareto distribution as written in the config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DistributionConfig {
    /// Exclusive upper bound on sampled values.
    #[serde(rename = "N", default)]
    pub n: Option<f64>,
    /// Pareto shape parameter.
    #[serde(default)]
    pub a: Option<f64>,
}

/// Validated distribution parameters: `n` and `a` both positive and finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParetoParams {
    pub n: f64,
    pub a: f64,
}

impl DistributionConfig {
    pub fn new(n: u64, a: f64) -> Self {
        Self { n: Some(n as f64), a: Some(a) }
    }

    /// Check that both parameters are present and non-zero.
    ///
    /// `name` identifies the distribution (e.g. `"medDistribution"`) in the
    /// error message.
    pub fn params(&self, name: &str) -> DummyResult<ParetoParams> {
        let n = match self.n {
            Some(n) if n.is_finite() && n > 0.0 => n,
            other => {
                return Err(DummyError::ConfigError {
                    reason: format!("{name}.N must be a positive number, got {other:?}"),
                })
            }
        };
        let a = match self.a {
            Some(a) if a.is_finite() && a > 0.0 => a,
            other => {
                return Err(DummyError::ConfigError {
                    reason: format!("{name}.a must be a positive number, got {other:?}"),
                })
            }
        };
        Ok(ParetoParams { n, a })
    }
}

fn default_record_count() -> u64 {
    DEFAULT_RECORD_COUNT
}

fn default_write_form() -> String {
    "csv".to_string()
}

/// The top-level configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetConfig {
    /// Distribution of medicine identifiers per record.
    #[serde(default)]
    pub med_distribution: DistributionConfig,

    /// Distribution of symptom (side-effect) identifiers per record.
    #[serde(default)]
    pub side_distribution: DistributionConfig,

    #[serde(default = "default_record_count")]
    pub required_record_count: u64,

    /// Raw output format name. Parsed into [`OutputFormat`] only when the
    /// dataset is written, so an unknown value surfaces after generation.
    #[serde(default = "default_write_form")]
    pub write_form: String,
}

impl DatasetConfig {
    /// Run the semantic checks that JSON Schema cannot express.
    pub fn validate(&self) -> DummyResult<()> {
        self.med_distribution.params("medDistribution")?;
        self.side_distribution.params("sideDistribution")?;
        if self.required_record_count >= RECORD_COUNT_LIMIT {
            return Err(DummyError::ConfigError {
                reason: format!(
                    "requiredRecordCount must be below {RECORD_COUNT_LIMIT}, got {}",
                    self.required_record_count
                ),
            });
        }
        Ok(())
    }
}

/// Supported dataset serializations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Json,
}

impl OutputFormat {
    /// Parse a `writeForm` value.
    ///
    /// Unknown names produce a `ConfigError` that quotes the offending value.
    pub fn parse(value: &str) -> DummyResult<Self> {
        match value {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(DummyError::ConfigError {
                reason: format!(
                    "unsupported output format \"{other}\": expected one of [\"csv\", \"json\"]"
                ),
            }),
        }
    }

    /// File name the dataset is written to inside the output directory.
    pub fn file_name(self) -> &'static str {
        match self {
            OutputFormat::Csv => "data.csv",
            OutputFormat::Json => "data.json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Csv => f.write_str("csv"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}
