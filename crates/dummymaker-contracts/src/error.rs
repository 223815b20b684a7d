//! Error types for the dummymaker pipeline.
//!
//! Every fallible operation in the workspace returns `DummyResult<T>`.
//! Variants carry a human-readable `reason` so the CLI can print them as-is.

use thiserror::Error;

/// The unified error type for dataset generation.
#[derive(Debug, Error)]
pub enum DummyError {
    /// A configuration value is missing, falsy, or inconsistent with the
    /// loaded tables.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// A finite resource ran out, e.g. every patient identifier in
    /// `[1, target_population]` has already been issued.
    #[error("resource exhausted: {reason}")]
    ResourceExhausted { reason: String },

    /// A statistics table could not be read or one of its rows is malformed.
    #[error("table load failed: {reason}")]
    TableLoad { reason: String },

    /// The configuration document does not match the embedded JSON Schema.
    #[error("schema validation error: {reason}")]
    SchemaValidation { reason: String },

    /// Serializing or writing the generated dataset failed.
    #[error("output write failed: {reason}")]
    OutputWriteFailed { reason: String },
}

/// Convenience alias used throughout the dummymaker crates.
pub type DummyResult<T> = Result<T, DummyError>;
