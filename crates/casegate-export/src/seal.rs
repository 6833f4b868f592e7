//! Self-referential hashing via the sentinel rule.
//!
//! A report cannot contain the hash of itself-including-that-hash. The
//! sentinel rule sidesteps the circularity: hash the report with
//! `inputs_digest.canonical_sha256` fixed to 64 ASCII zeros (the
//! *preimage*), then substitute the computed hash into the final report.
//!
//! The rule is symmetric: a verifier re-substitutes the sentinel over the
//! *claimed* hash field, recomputes, and compares. Both directions go
//! through the same `preimage_hash` so they cannot drift apart.

use serde_json::Value;

use casegate_canon::canonical_sha256;
use casegate_contracts::{
    error::{CasegateError, CasegateResult},
    report::HASH_SENTINEL,
};

/// JSON pointer to the self-referential hash field.
const HASH_POINTER: &str = "/inputs_digest/canonical_sha256";

/// Hash the report value with the sentinel substituted over the hash field.
fn preimage_hash(report: &Value) -> CasegateResult<String> {
    let mut preimage = report.clone();
    let slot = preimage
        .pointer_mut(HASH_POINTER)
        .ok_or_else(|| CasegateError::ContractViolation {
            reason: format!("report has no {HASH_POINTER} field"),
        })?;
    *slot = Value::String(HASH_SENTINEL.to_string());
    canonical_sha256(&preimage)
}

/// Compute the self-referential hash for a report under assembly.
///
/// The report's hash field may hold the sentinel or anything else — it is
/// overwritten in the preimage either way.
pub fn compute_canonical_hash(report: &Value) -> CasegateResult<String> {
    preimage_hash(report)
}

/// Check a finished report's claimed hash by the symmetric rule.
///
/// Returns `false` when the claimed hash is absent, not a string, or does
/// not equal the recomputed preimage hash.
pub fn verify_canonical_hash(report: &Value) -> CasegateResult<bool> {
    let claimed = match report.pointer(HASH_POINTER).and_then(Value::as_str) {
        Some(s) => s.to_string(),
        None => return Ok(false),
    };
    Ok(preimage_hash(report)? == claimed)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{compute_canonical_hash, verify_canonical_hash};
    use casegate_contracts::report::HASH_SENTINEL;

    fn report_skeleton() -> serde_json::Value {
        json!({
            "schema_version": "casegate-report-v1",
            "case_id": "c-1",
            "report_id": "r-1",
            "inputs_digest": {
                "canonical_sha256": HASH_SENTINEL,
                "audit_head_sha256": "ab".repeat(32),
            },
            "summary": {"status": "PASS", "block_count": 0, "warn_count": 0, "info_count": 0},
            "gate_outcomes": {},
            "violations": [],
            "warnings": [],
        })
    }

    /// Sentinel round trip: a sealed report verifies; altering the claimed
    /// hash post hoc fails.
    #[test]
    fn sealed_report_round_trips() {
        let mut report = report_skeleton();
        let hash = compute_canonical_hash(&report).unwrap();
        *report.pointer_mut("/inputs_digest/canonical_sha256").unwrap() = hash.clone().into();

        assert!(verify_canonical_hash(&report).unwrap());

        *report.pointer_mut("/inputs_digest/canonical_sha256").unwrap() =
            "ff".repeat(32).into();
        assert!(!verify_canonical_hash(&report).unwrap());
    }

    /// Any post-seal content edit invalidates the seal.
    #[test]
    fn content_edit_after_sealing_is_detected() {
        let mut report = report_skeleton();
        let hash = compute_canonical_hash(&report).unwrap();
        *report.pointer_mut("/inputs_digest/canonical_sha256").unwrap() = hash.into();

        *report.pointer_mut("/summary/block_count").unwrap() = 7.into();
        assert!(!verify_canonical_hash(&report).unwrap());
    }

    /// The computed hash is independent of whatever sits in the hash slot.
    #[test]
    fn hash_ignores_current_slot_contents() {
        let mut a = report_skeleton();
        let mut b = report_skeleton();
        *a.pointer_mut("/inputs_digest/canonical_sha256").unwrap() = "junk".into();
        *b.pointer_mut("/inputs_digest/canonical_sha256").unwrap() = "other junk".into();

        assert_eq!(
            compute_canonical_hash(&a).unwrap(),
            compute_canonical_hash(&b).unwrap()
        );
    }

    #[test]
    fn missing_hash_field_fails_closed() {
        let report = json!({"schema_version": "casegate-report-v1"});
        assert!(!verify_canonical_hash(&report).unwrap());
    }
}
