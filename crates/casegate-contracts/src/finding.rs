//! Finding types and the canonical finding order.
//!
//! A `Finding` is created once by a gate, never mutated, and sorted into a
//! deterministic total order before serialization so that evaluation runs
//! with different internal iteration order still produce byte-identical
//! reports.

use serde::{Deserialize, Serialize};

/// Finding severity. `BLOCK` flips the report to FAIL; `WARN` and `INFO`
/// never do, but flip an otherwise-PASS gate outcome to WARN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Block,
    Warn,
    Info,
}

impl Severity {
    /// Sort rank: BLOCK < WARN < INFO. First key of the canonical order.
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Block => 0,
            Severity::Warn => 1,
            Severity::Info => 2,
        }
    }

    /// The UPPERCASE wire form, identical to the serde rename. Also the
    /// form hashed into the finding id.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Block => "BLOCK",
            Severity::Warn => "WARN",
            Severity::Info => "INFO",
        }
    }
}

/// The object a finding points at, e.g. `{type: "opinion", id: "op-3"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindingObject {
    #[serde(rename = "type")]
    pub object_type: String,
    pub id: String,
}

/// A single structured issue produced by a gate.
///
/// `id` is a pure function of the structural tuple
/// `(gate_id, code, sub_code, severity, object.type, object.id)` —
/// `message` is deliberately excluded so wording edits never change
/// identity, while any structural edit does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// Content-derived UUIDv5, stable across cosmetic wording edits.
    pub id: String,

    /// The gate that produced this finding.
    pub gate_id: String,

    /// Machine-readable violation code, e.g. `OPINION_NO_BASIS`.
    pub code: String,

    /// Narrower condition within `code`, e.g. `NO_SUPPORTING_ANCHORS`.
    pub sub_code: String,

    pub severity: Severity,

    /// Human-readable description. Excluded from the id.
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation_hint: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec_reference: Option<String>,

    pub object: FindingObject,
}

impl Finding {
    /// The ordering key of the canonical finding sort:
    /// severity rank → gate_id → code → sub_code → object.type →
    /// object.id → id.
    pub fn sort_key(&self) -> (u8, &str, &str, &str, &str, &str, &str) {
        (
            self.severity.rank(),
            &self.gate_id,
            &self.code,
            &self.sub_code,
            &self.object.object_type,
            &self.object.id,
            &self.id,
        )
    }
}

/// Sort findings into the canonical total order.
///
/// Applied once, after all gates complete and before assembly —
/// parallel gate evaluation must never leak into output ordering.
pub fn sort_findings(findings: &mut [Finding]) {
    findings.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
}
