//! Report assembly.
//!
//! Takes the merged engine output plus the input digests and produces the
//! sealed canonical report and its companion meta record. Findings are
//! sorted into the canonical order *before* assembly so independent
//! evaluation runs with different internal iteration order serialize
//! identically.

use std::collections::BTreeMap;

use chrono::Utc;
use tracing::info;

use casegate_contracts::{
    error::{CasegateError, CasegateResult},
    finding::{sort_findings, Finding, Severity},
    report::{
        CanonReport, GateOutcome, InputsDigest, MetaReport, ReportStatus, Summary,
        HASH_SENTINEL, SCHEMA_VERSION,
    },
};

use crate::seal::compute_canonical_hash;

/// Build the sealed canonical report and the meta report.
///
/// `audit_head_sha256` is the chain head at export time; `report_id` is
/// the deterministic id derived by the caller from the inputs. The
/// returned canonical report carries its own hash in
/// `inputs_digest.canonical_sha256`, computed by the sentinel rule.
pub fn assemble(
    mut findings: Vec<Finding>,
    gate_outcomes: BTreeMap<String, GateOutcome>,
    case_id: &str,
    report_id: &str,
    audit_head_sha256: &str,
    audit_event_count: u64,
) -> CasegateResult<(CanonReport, MetaReport)> {
    sort_findings(&mut findings);

    let block_count = findings.iter().filter(|f| f.severity == Severity::Block).count() as u64;
    let warn_count = findings.iter().filter(|f| f.severity == Severity::Warn).count() as u64;
    let info_count = findings.iter().filter(|f| f.severity == Severity::Info).count() as u64;

    let (violations, warnings): (Vec<Finding>, Vec<Finding>) = findings
        .into_iter()
        .partition(|f| f.severity == Severity::Block);

    let status = if violations.is_empty() {
        ReportStatus::Pass
    } else {
        ReportStatus::Fail
    };

    let mut canon = CanonReport {
        schema_version: SCHEMA_VERSION.to_string(),
        case_id: case_id.to_string(),
        report_id: report_id.to_string(),
        inputs_digest: InputsDigest {
            canonical_sha256: HASH_SENTINEL.to_string(),
            audit_head_sha256: audit_head_sha256.to_string(),
        },
        summary: Summary {
            status,
            block_count,
            warn_count,
            info_count,
        },
        gate_outcomes,
        violations,
        warnings,
    };

    // Seal: hash the structure with the sentinel in place, then substitute.
    let value = serde_json::to_value(&canon).map_err(|e| CasegateError::ContractViolation {
        reason: format!("report serialization failed: {e}"),
    })?;
    canon.inputs_digest.canonical_sha256 = compute_canonical_hash(&value)?;

    let meta = MetaReport {
        generated_at: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        schema_version: SCHEMA_VERSION.to_string(),
        case_id: case_id.to_string(),
        report_id: report_id.to_string(),
        audit_event_count,
    };

    info!(
        case_id,
        report_id,
        status = ?canon.summary.status,
        block_count,
        warn_count,
        "report assembled and sealed"
    );

    Ok((canon, meta))
}
