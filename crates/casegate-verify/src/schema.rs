//! JSON-Schema structural validation of the canonical report.
//!
//! The default schema is compiled in; `--schema` substitutes an external
//! document. Failures come back as structured path + reason pairs. A
//! malformed schema document is itself reported as a single failure so the
//! run can still be audited rather than aborting.

use std::path::Path;

use serde_json::Value;
use tracing::warn;

use casegate_contracts::error::{CasegateError, CasegateResult};

/// The built-in contract schema for `gate_report.canon.json`.
pub const DEFAULT_SCHEMA: &str = include_str!("../schemas/gate_report.schema.json");

/// One structural violation: where and why.
#[derive(Debug, Clone)]
pub struct SchemaFailure {
    pub path: String,
    pub reason: String,
}

/// Load a schema document from `path`, or the built-in default when absent.
pub fn load_schema(path: Option<&Path>) -> CasegateResult<Value> {
    let text = match path {
        Some(p) => std::fs::read_to_string(p).map_err(|e| CasegateError::ExecutionError {
            reason: format!("failed to read schema '{}': {}", p.display(), e),
        })?,
        None => DEFAULT_SCHEMA.to_string(),
    };
    serde_json::from_str(&text).map_err(|e| CasegateError::ContractViolation {
        reason: format!("schema document is not valid JSON: {e}"),
    })
}

/// Validate `report` against `schema`, collecting every violation.
pub fn validate(report: &Value, schema: &Value) -> Vec<SchemaFailure> {
    match jsonschema::validator_for(schema) {
        Ok(validator) => validator
            .iter_errors(report)
            .map(|error| {
                let failure = SchemaFailure {
                    path: error.instance_path.to_string(),
                    reason: error.to_string(),
                };
                warn!(path = %failure.path, reason = %failure.reason, "schema violation");
                failure
            })
            .collect(),
        Err(e) => vec![SchemaFailure {
            path: String::new(),
            reason: format!("invalid JSON Schema document: {e}"),
        }],
    }
}
