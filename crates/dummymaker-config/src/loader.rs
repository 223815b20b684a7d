//! Configuration loading.
//!
//! Both JSON and TOML documents are first normalised to a `serde_json::Value`,
//! then:
//!
//! 1. validated against the embedded JSON Schema (structure and types),
//! 2. deserialized into `DatasetConfig`,
//! 3. checked with `DatasetConfig::validate` (non-zero distribution
//!    parameters, record count limit).
//!
//! Any failure aborts loading, so no sampling starts on a bad configuration.

use std::path::Path;

use serde_json::Value;
use tracing::{debug, warn};

use dummymaker_contracts::{
    config::DatasetConfig,
    error::{DummyError, DummyResult},
};

use crate::schema::config_schema;

/// Loads and validates `DatasetConfig` documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// Parse `s` as a JSON configuration document.
    ///
    /// Returns `DummyError::ConfigError` if the JSON is malformed,
    /// `DummyError::SchemaValidation` if it does not match the schema.
    pub fn from_json_str(s: &str) -> DummyResult<DatasetConfig> {
        let value: Value = serde_json::from_str(s).map_err(|e| DummyError::ConfigError {
            reason: format!("failed to parse config JSON: {}", e),
        })?;
        Self::from_value(value)
    }

    /// Parse `s` as a TOML configuration document using the same keys as the
    /// JSON form.
    pub fn from_toml_str(s: &str) -> DummyResult<DatasetConfig> {
        let value: Value = toml::from_str(s).map_err(|e| DummyError::ConfigError {
            reason: format!("failed to parse config TOML: {}", e),
        })?;
        Self::from_value(value)
    }

    /// Read the file at `path`. Files ending in `.toml` are parsed as TOML,
    /// everything else as JSON.
    pub fn from_file(path: &Path) -> DummyResult<DatasetConfig> {
        let contents = std::fs::read_to_string(path).map_err(|e| DummyError::ConfigError {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;

        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        debug!(path = %path.display(), toml = is_toml, "loading configuration");
        if is_toml {
            Self::from_toml_str(&contents)
        } else {
            Self::from_json_str(&contents)
        }
    }

    /// Validate an already-parsed document and build the config.
    pub fn from_value(value: Value) -> DummyResult<DatasetConfig> {
        Self::check_schema(&value)?;

        let config: DatasetConfig =
            serde_json::from_value(value).map_err(|e| DummyError::ConfigError {
                reason: format!("config does not match the expected layout: {}", e),
            })?;
        config.validate()?;

        debug!(
            required_record_count = config.required_record_count,
            write_form = %config.write_form,
            "configuration loaded"
        );
        Ok(config)
    }

    /// Collect every schema violation into one `SchemaValidation` error.
    fn check_schema(value: &Value) -> DummyResult<()> {
        let schema = config_schema();
        let validator = jsonschema::validator_for(&schema).map_err(|e| DummyError::ConfigError {
            reason: format!("invalid embedded config schema: {e}"),
        })?;

        let violations: Vec<String> = validator
            .iter_errors(value)
            .map(|error| format!("at '{}': {}", error.instance_path, error))
            .collect();

        if violations.is_empty() {
            return Ok(());
        }

        for message in &violations {
            warn!(%message, "config schema violation");
        }
        Err(DummyError::SchemaValidation {
            reason: violations.join("; "),
        })
    }
}
