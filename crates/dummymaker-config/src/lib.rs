//! # dummymaker-config
//!
//! Loads the run configuration for dummymaker from JSON or TOML.
//!
//! ## Overview
//!
//! [`ConfigLoader`] parses a document, validates its structure against an
//! embedded JSON Schema, deserializes it into
//! [`DatasetConfig`](dummymaker_contracts::config::DatasetConfig), and runs
//! the semantic checks. Distribution problems are reported before any
//! sampling begins.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use dummymaker_config::ConfigLoader;
//!
//! let config = ConfigLoader::from_file(Path::new("resources/config.json"))?;
//! ```

pub mod loader;
pub mod schema;

pub use loader::ConfigLoader;

// ── Tests ─────────────────────────────────────────────────────────────────────
