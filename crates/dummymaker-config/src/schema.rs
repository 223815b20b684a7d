//! The embedded JSON Schema for configuration documents.
//!
//! The schema covers structure only: which keys exist and what types they
//! hold. Value rules that need context (non-zero parameters, the record
//! count limit) live in `DatasetConfig::validate`. Distribution objects and
//! their parameters may be absent or null here; those cases are reported as
//! configuration errors naming the distribution.

use serde_json::{json, Value};

/// Build the JSON Schema that every configuration document must satisfy.
pub fn config_schema() -> Value {
    let distribution = json!({
        "type": "object",
        "properties": {
            "N": { "type": ["number", "null"], "minimum": 0 },
            "a": { "type": ["number", "null"] }
        }
    });

    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": "dummymaker configuration",
        "type": "object",
        "properties": {
            "medDistribution": distribution,
            "sideDistribution": distribution,
            "requiredRecordCount": { "type": "integer", "minimum": 0 },
            "writeForm": { "type": "string" }
        }
    })
}
