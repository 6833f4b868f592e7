//! Canonical JSON form and hashing.
//!
//! Canonical form rules:
//!   - object keys sorted by Unicode code point, recursively
//!   - arrays left in caller order (callers sort arrays that need
//!     determinism, e.g. findings)
//!   - no insignificant whitespace
//!   - strings JSON-escaped per RFC 8259 (serde_json handles this)
//!   - numbers: integers only — floats are rejected outright, because
//!     float formatting diverges across languages and would break
//!     cross-implementation hashing

use std::collections::BTreeMap;

use serde_json::Value;
use sha2::{Digest, Sha256};

use casegate_contracts::error::{CasegateError, CasegateResult, ReasonCode};

/// Return `v` with every object's keys rebuilt in sorted order, recursively.
///
/// Returns `IntegrityViolation(NON_INTEGER_NUMBER)` if any number in the
/// structure is not an i64/u64 — hashed structures are integer-only by
/// contract.
pub fn canonicalize(v: &Value) -> CasegateResult<Value> {
    match v {
        Value::Object(map) => {
            // BTreeMap sorts String keys byte-wise, which for UTF-8 equals
            // code-point order.
            let mut sorted: BTreeMap<&String, Value> = BTreeMap::new();
            for (k, vv) in map {
                sorted.insert(k, canonicalize(vv)?);
            }
            let mut out = serde_json::Map::with_capacity(sorted.len());
            for (k, vv) in sorted {
                out.insert(k.clone(), vv);
            }
            Ok(Value::Object(out))
        }
        Value::Array(arr) => {
            let mut out = Vec::with_capacity(arr.len());
            for vv in arr {
                out.push(canonicalize(vv)?);
            }
            Ok(Value::Array(out))
        }
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                Ok(Value::Number(n.clone()))
            } else {
                Err(CasegateError::IntegrityViolation {
                    code: ReasonCode::NonIntegerNumber,
                    reason: format!("canonical JSON forbids non-integer number {n}"),
                })
            }
        }
        other => Ok(other.clone()),
    }
}

/// Serialize `v` in canonical form with no inserted whitespace.
pub fn canonical_stringify(v: &Value) -> CasegateResult<String> {
    let normalized = canonicalize(v)?;
    serde_json::to_string(&normalized).map_err(|e| CasegateError::InputMalformed {
        reason: format!("canonical serialization failed: {e}"),
    })
}

/// SHA-256 over the UTF-8 bytes of the canonical string of `v`.
///
/// Returns a lowercase 64-character hex string.
pub fn canonical_sha256(v: &Value) -> CasegateResult<String> {
    let s = canonical_stringify(v)?;
    let mut hasher = Sha256::new();
    hasher.update(s.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}
