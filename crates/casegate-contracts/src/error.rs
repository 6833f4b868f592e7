//! Error types and machine-readable reason codes for the CASEGATE pipeline.
//!
//! All fallible operations return `CasegateResult<T>`. The four error
//! variants map one-to-one onto the failure taxonomy the pipeline enforces:
//! input malformation is recoverable, integrity violations are never
//! silently recovered, contract violations invalidate an export without
//! aborting evaluation, and execution errors are fatal with no partial
//! output.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A stable, machine-readable identifier for every named failure the
/// pipeline can surface.
///
/// The wire form is SCREAMING_SNAKE_CASE (e.g. `CHAIN_BROKEN_AT_SEQ`) so
/// downstream tooling can match on codes without parsing human-readable
/// messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonCode {
    /// An audit event's recomputed or linked hash did not match.
    ChainBrokenAtSeq,
    /// Audit event sequence numbers are not strictly increasing.
    SeqNonMonotonic,
    /// Audit event timestamps regress (reported separately, weaker check).
    TimestampNonMonotonic,
    /// The report's self-referential canonical hash does not re-derive.
    CanonicalHashMismatch,
    /// The report's claimed audit head hash does not match the recomputed chain head.
    AuditHeadMismatch,
    /// Two findings in `violations ∪ warnings` share an id.
    DuplicateFindingId,
    /// A finding's id does not re-derive from its structural fields.
    FindingIdMismatch,
    /// `violations` or `warnings` is not in canonical finding order.
    FindingOrderInvalid,
    /// `summary` disagrees with the findings actually present.
    SummaryInconsistent,
    /// The canonical report fails JSON-Schema validation.
    SchemaViolation,
    /// The report diverges from the golden fixture.
    GoldenMismatch,
    /// A required export file is missing.
    ExportFileMissing,
    /// The export directory carries no audit log (soft).
    AuditLogAbsent,
    /// The audit log is present but cannot be parsed.
    AuditLogUnreadable,
    /// The canonical report file is not parseable JSON.
    CanonReportUnreadable,
    /// A hashed structure contains a non-integer number.
    NonIntegerNumber,
}

impl ReasonCode {
    /// The SCREAMING_SNAKE_CASE wire form, identical to the serde rename.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasonCode::ChainBrokenAtSeq => "CHAIN_BROKEN_AT_SEQ",
            ReasonCode::SeqNonMonotonic => "SEQ_NON_MONOTONIC",
            ReasonCode::TimestampNonMonotonic => "TIMESTAMP_NON_MONOTONIC",
            ReasonCode::CanonicalHashMismatch => "CANONICAL_HASH_MISMATCH",
            ReasonCode::AuditHeadMismatch => "AUDIT_HEAD_MISMATCH",
            ReasonCode::DuplicateFindingId => "DUPLICATE_FINDING_ID",
            ReasonCode::FindingIdMismatch => "FINDING_ID_MISMATCH",
            ReasonCode::FindingOrderInvalid => "FINDING_ORDER_INVALID",
            ReasonCode::SummaryInconsistent => "SUMMARY_INCONSISTENT",
            ReasonCode::SchemaViolation => "SCHEMA_VIOLATION",
            ReasonCode::GoldenMismatch => "GOLDEN_MISMATCH",
            ReasonCode::ExportFileMissing => "EXPORT_FILE_MISSING",
            ReasonCode::AuditLogAbsent => "AUDIT_LOG_ABSENT",
            ReasonCode::AuditLogUnreadable => "AUDIT_LOG_UNREADABLE",
            ReasonCode::CanonReportUnreadable => "CANON_REPORT_UNREADABLE",
            ReasonCode::NonIntegerNumber => "NON_INTEGER_NUMBER",
        }
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The unified error type for the CASEGATE pipeline.
#[derive(Debug, Error)]
pub enum CasegateError {
    /// Case data or the audit log is malformed or partially populated.
    ///
    /// Gates recover from this locally by falling back to audit-event
    /// reconstruction; it only becomes an error when nothing can be read
    /// at all (e.g. an unparseable NDJSON line).
    #[error("malformed input: {reason}")]
    InputMalformed { reason: String },

    /// A hash, chain, or identity invariant failed — tampering or an
    /// engine bug. Never silently recovered.
    #[error("integrity violation [{code}]: {reason}")]
    IntegrityViolation { code: ReasonCode, reason: String },

    /// The canonical report does not satisfy the schema contract.
    /// Non-fatal to evaluation, fatal to export validity.
    #[error("contract violation: {reason}")]
    ContractViolation { reason: String },

    /// Missing files or directories, unwritable output. Fatal; no partial
    /// output is written.
    #[error("execution error: {reason}")]
    ExecutionError { reason: String },
}

impl From<std::io::Error> for CasegateError {
    fn from(e: std::io::Error) -> Self {
        CasegateError::ExecutionError {
            reason: e.to_string(),
        }
    }
}

/// Convenience alias used throughout the CASEGATE crates.
pub type CasegateResult<T> = Result<T, CasegateError>;
