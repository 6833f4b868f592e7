//! The scenario pack and the full export pipeline over one.
//!
//! `produce_export` is the canonical composition of the pipeline stages:
//! evaluate gates, derive the report id from the inputs, assemble and seal
//! the report, write the export directory. The runner uses it for named
//! scenarios and for caller-supplied case/audit files alike.

use std::path::Path;

use tracing::info;

use casegate_audit::head_hash;
use casegate_canon::{canonical_sha256, report_id};
use casegate_contracts::{
    audit::AuditEvent,
    case::CaseFile,
    error::{CasegateError, CasegateResult},
    report::{CanonReport, MetaReport},
};
use casegate_export::{assemble, write_export};

/// One scenario: a case file plus the audit chain recorded for it.
#[derive(Debug, Clone)]
pub struct ScenarioPack {
    pub name: &'static str,
    pub case: CaseFile,
    pub events: Vec<AuditEvent>,
}

/// Run the full pipeline over `pack` and write the export at `dir`.
///
/// Deterministic end to end: the same pack always produces byte-identical
/// export files (the meta report's `generated_at` excepted — it is outside
/// the canonical surface).
pub fn produce_export(pack: &ScenarioPack, dir: &Path) -> CasegateResult<(CanonReport, MetaReport)> {
    let output = casegate_gates::evaluate(&pack.case, &pack.events);

    let case_value =
        serde_json::to_value(&pack.case).map_err(|e| CasegateError::ContractViolation {
            reason: format!("case file serialization failed: {e}"),
        })?;
    let case_sha256 = canonical_sha256(&case_value)?;
    let audit_head = head_hash(&pack.events);

    let rid = report_id(&pack.case.case_id, &case_sha256, &audit_head).to_string();

    let (canon, meta) = assemble(
        output.findings,
        output.gate_outcomes,
        &pack.case.case_id,
        &rid,
        &audit_head,
        pack.events.len() as u64,
    )?;
    write_export(dir, &canon, &meta, &pack.events)?;

    info!(
        scenario = pack.name,
        case_id = %pack.case.case_id,
        report_id = %rid,
        status = ?canon.summary.status,
        "scenario exported"
    );
    Ok((canon, meta))
}

#[cfg(test)]
mod tests {
    use super::produce_export;
    use crate::scenarios::{scenario, NAMES};
    use casegate_audit::verify_chain;
    use casegate_contracts::report::ReportStatus;
    use casegate_export::CANON_FILE;

    /// Every named scenario carries a chain that verifies.
    #[test]
    fn all_scenario_chains_verify() {
        for name in NAMES {
            let pack = scenario(name).unwrap();
            let verification = verify_chain(&pack.events).unwrap();
            assert!(verification.valid, "scenario '{name}' chain is broken");
        }
    }

    #[test]
    fn pass_scenario_produces_a_pass_report() {
        let dir = tempfile::tempdir().unwrap();
        let pack = scenario("pass").unwrap();
        let (canon, meta) = produce_export(&pack, dir.path()).unwrap();

        assert_eq!(canon.summary.status, ReportStatus::Pass);
        assert!(canon.violations.is_empty());
        assert_eq!(meta.audit_event_count, pack.events.len() as u64);
    }

    #[test]
    fn missing_basis_scenario_fails_on_the_basis_gate() {
        let dir = tempfile::tempdir().unwrap();
        let pack = scenario("missing-basis").unwrap();
        let (canon, _) = produce_export(&pack, dir.path()).unwrap();

        assert_eq!(canon.summary.status, ReportStatus::Fail);
        // Exactly one BLOCK: the unanchored opinion, nothing else.
        assert_eq!(canon.violations.len(), 1);
        let f = &canon.violations[0];
        assert_eq!(f.gate_id, "basis-required");
        assert_eq!(f.code, "OPINION_NO_BASIS");
        assert_eq!(f.sub_code, "NO_SUPPORTING_ANCHORS");
        assert_eq!(f.object.id, "op-misstatement");
    }

    #[test]
    fn contradiction_scenario_fails_on_the_conflict_gate() {
        let dir = tempfile::tempdir().unwrap();
        let pack = scenario("contradiction").unwrap();
        let (canon, _) = produce_export(&pack, dir.path()).unwrap();

        assert_eq!(canon.summary.status, ReportStatus::Fail);
        assert!(canon
            .violations
            .iter()
            .any(|f| f.code == "CONTRADICTION_UNRESOLVED"));
    }

    /// Byte-identity across independent runs of the same scenario.
    #[test]
    fn repeated_exports_are_byte_identical() {
        let pack = scenario("scale").unwrap();

        let dir_a = tempfile::tempdir().unwrap();
        let dir_b = tempfile::tempdir().unwrap();
        produce_export(&pack, dir_a.path()).unwrap();
        produce_export(&pack, dir_b.path()).unwrap();

        let a = std::fs::read(dir_a.path().join(CANON_FILE)).unwrap();
        let b = std::fs::read(dir_b.path().join(CANON_FILE)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn unknown_scenario_name_is_rejected() {
        assert!(scenario("nonexistent").is_err());
    }
}
