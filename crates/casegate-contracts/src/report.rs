//! Gate report types: the hash-sealed canonical report and its companion
//! metadata record.
//!
//! The canonical report contains **no volatile data** — no wall-clock
//! values, paths, or randomness. Everything deliberately excluded from it
//! (generation time, engine version) lives in `MetaReport`, which is
//! excluded from all hashing and golden comparisons.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::finding::Finding;

/// The fixed contract version written into every canonical report.
pub const SCHEMA_VERSION: &str = "casegate-report-v1";

/// The sentinel written into `inputs_digest.canonical_sha256` while the
/// self-referential hash is computed: 64 ASCII zeros. Identical in value
/// to the chain genesis hash, distinct in role.
pub const HASH_SENTINEL: &str =
    "0000000000000000000000000000000000000000000000000000000000000000";

/// Per-gate outcome. A gate with zero applicable objects trivially PASSes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GateOutcome {
    Pass,
    Fail,
    Warn,
}

/// Overall report status: PASS iff `violations` is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReportStatus {
    Pass,
    Fail,
}

impl ReportStatus {
    /// The UPPERCASE wire form, identical to the serde rename.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pass => "PASS",
            ReportStatus::Fail => "FAIL",
        }
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Digest block tying the report to its inputs and to itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputsDigest {
    /// Self-referential SHA-256 of this report, computed via the sentinel
    /// rule: hash the report with this field set to `HASH_SENTINEL`, then
    /// substitute the result here.
    pub canonical_sha256: String,

    /// `chain_hash` of the last audit event at export time
    /// (`GENESIS_HASH` when the log is empty).
    pub audit_head_sha256: String,
}

/// Aggregate finding counts and the derived status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub status: ReportStatus,
    pub block_count: u64,
    pub warn_count: u64,
    pub info_count: u64,
}

/// The hash-sealed canonical gate report (`gate_report.canon.json`).
///
/// Written once; a re-export over changed inputs yields a new `report_id`
/// and hash rather than an in-place update. `gate_outcomes` is a `BTreeMap`
/// so key order is deterministic without relying on serializer behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonReport {
    pub schema_version: String,
    pub case_id: String,
    /// Deterministic UUIDv5 over (case_id, case sha256, audit head) —
    /// identical inputs reproduce the same id, changed inputs mint a new one.
    pub report_id: String,
    pub inputs_digest: InputsDigest,
    pub summary: Summary,
    pub gate_outcomes: BTreeMap<String, GateOutcome>,
    /// BLOCK findings, canonically sorted.
    pub violations: Vec<Finding>,
    /// WARN and INFO findings, canonically sorted.
    pub warnings: Vec<Finding>,
}

/// The companion metadata report (`gate_report.meta.json`).
///
/// Everything volatile lives here and only here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaReport {
    /// Wall-clock generation time (UTC).
    pub generated_at: DateTime<Utc>,
    /// Version of the engine that produced the export.
    pub engine_version: String,
    pub schema_version: String,
    pub case_id: String,
    pub report_id: String,
    /// Number of audit events consumed at export time.
    pub audit_event_count: u64,
}
