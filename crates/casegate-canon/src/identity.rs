//! Content-derived identifiers (RFC 4122 UUIDv5).
//!
//! A finding's id is a pure function of its structural tuple — gate, code,
//! sub-code, severity, and target object. The human-readable `message` is
//! excluded, so wording-only edits never change identity while any
//! structural edit mints a new id. Collisions across distinct tuples are a
//! bug, not a possibility to handle.

use uuid::Uuid;

use casegate_contracts::finding::Severity;

/// Fixed namespace for finding ids. Changing this constant changes every
/// finding id ever minted — it is part of the wire contract.
pub const FINDING_NAMESPACE: Uuid =
    Uuid::from_u128(0x8c9e0f4a_2d71_5b36_a1e8_4c029d5f7b13);

/// Fixed namespace for report ids.
pub const REPORT_NAMESPACE: Uuid =
    Uuid::from_u128(0x3b7d61c8_94e2_5f0a_b5d4_1a86e3c20f49);

/// Derive the stable id for a finding.
///
/// UUIDv5 over the `'|'`-joined structural tuple. None of the inputs may
/// themselves contain `'|'` — gate ids, codes, and object ids are
/// machine-chosen tokens, never free text.
pub fn finding_id(
    gate_id: &str,
    code: &str,
    sub_code: &str,
    severity: Severity,
    object_type: &str,
    object_id: &str,
) -> Uuid {
    let name = [gate_id, code, sub_code, severity.as_str(), object_type, object_id].join("|");
    Uuid::new_v5(&FINDING_NAMESPACE, name.as_bytes())
}

/// Derive the report id from the inputs the report commits to.
///
/// Deterministic: identical `(case, audit log)` inputs reproduce the same
/// report id (the byte-identity property demands it), while any input
/// change yields a new one — which is what makes a re-export a new report
/// rather than an in-place update.
pub fn report_id(case_id: &str, case_sha256: &str, audit_head_sha256: &str) -> Uuid {
    let name = [case_id, case_sha256, audit_head_sha256].join("|");
    Uuid::new_v5(&REPORT_NAMESPACE, name.as_bytes())
}
