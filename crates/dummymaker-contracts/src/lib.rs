//! # dummymaker-contracts
//!
//! Shared types, configuration schema, and error types for the dummymaker
//! workspace.
//!
//! All crates in the workspace import from here. No sampling or I/O logic
//! lives in this crate, only data definitions and validation.

pub mod config;
pub mod error;
pub mod record;
