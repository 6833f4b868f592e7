//! The verification pass.
//!
//! One synchronous walk over an export directory. Checks never short-
//! circuit: every check runs even after an earlier failure, so the caller
//! receives one complete diagnostic report instead of the first symptom.
//! Hard-check failures force overall FAIL; soft checks downgrade
//! confidence only, unless the config escalates them.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};

use casegate_audit::{read_ndjson, verify_chain};
use casegate_canon::finding_id;
use casegate_contracts::{
    error::{CasegateError, CasegateResult, ReasonCode},
    finding::Finding,
    report::CanonReport,
};
use casegate_export::{verify_canonical_hash, AUDIT_LOG_FILE, CANON_FILE, META_FILE};

use crate::config::VerifyConfig;
use crate::diff::diff_reports;
use crate::schema::{load_schema, validate};

/// Caller-supplied verification options.
#[derive(Debug, Default)]
pub struct VerifyOptions {
    /// External schema document; the built-in contract schema when `None`.
    pub schema: Option<PathBuf>,
    /// Golden fixture to diff against.
    pub golden: Option<PathBuf>,
    pub config: VerifyConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Fail,
    /// Degraded but not failing — e.g. an absent optional input.
    Soft,
}

/// One named check with its outcome and reason code.
#[derive(Debug, Clone)]
pub struct Check {
    pub name: &'static str,
    pub status: CheckStatus,
    pub reason_code: Option<ReasonCode>,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyResult {
    Pass,
    Fail,
}

/// The complete verification report.
#[derive(Debug)]
pub struct VerifyReport {
    pub result: VerifyResult,
    pub checks: Vec<Check>,
}

struct Checks(Vec<Check>);

impl Checks {
    fn pass(&mut self, name: &'static str, message: impl Into<String>) {
        self.0.push(Check {
            name,
            status: CheckStatus::Pass,
            reason_code: None,
            message: message.into(),
        });
    }

    fn fail(&mut self, name: &'static str, code: ReasonCode, message: impl Into<String>) {
        self.0.push(Check {
            name,
            status: CheckStatus::Fail,
            reason_code: Some(code),
            message: message.into(),
        });
    }

    fn soft(&mut self, name: &'static str, code: ReasonCode, message: impl Into<String>) {
        self.0.push(Check {
            name,
            status: CheckStatus::Soft,
            reason_code: Some(code),
            message: message.into(),
        });
    }
}

/// Verify the export at `dir`.
///
/// Returns `Err(ExecutionError)` only for environment-level problems — a
/// missing export directory, an unreadable `--schema`/`--golden` file.
/// Everything found *inside* the export is reported as checks.
pub fn verify_export(dir: &Path, opts: &VerifyOptions) -> CasegateResult<VerifyReport> {
    if !dir.is_dir() {
        return Err(CasegateError::ExecutionError {
            reason: format!("export directory '{}' does not exist", dir.display()),
        });
    }

    let mut checks = Checks(Vec::new());

    // ── Required-file presence ────────────────────────────────────────────
    let canon_path = dir.join(CANON_FILE);
    let meta_path = dir.join(META_FILE);
    for (name, path) in [("canon-file-presence", &canon_path), ("meta-file-presence", &meta_path)] {
        if path.is_file() {
            checks.pass(name, format!("{} present", path.display()));
        } else {
            checks.fail(
                name,
                ReasonCode::ExportFileMissing,
                format!("required file '{}' is missing", path.display()),
            );
        }
    }

    // ── Canonical report parse ────────────────────────────────────────────
    let canon_value: Option<Value> = match std::fs::read_to_string(&canon_path) {
        Ok(text) => match serde_json::from_str::<Value>(&text) {
            Ok(v) => {
                checks.pass("canon-parse", "canonical report parses as JSON");
                Some(v)
            }
            Err(e) => {
                checks.fail(
                    "canon-parse",
                    ReasonCode::CanonReportUnreadable,
                    format!("canonical report is not valid JSON: {e}"),
                );
                None
            }
        },
        Err(_) => None, // presence check already failed
    };

    // ── Self-referential hash re-derivation ───────────────────────────────
    if let Some(value) = &canon_value {
        match verify_canonical_hash(value) {
            Ok(true) => checks.pass("canonical-hash", "canonical_sha256 re-derives"),
            Ok(false) => checks.fail(
                "canonical-hash",
                ReasonCode::CanonicalHashMismatch,
                "claimed canonical_sha256 does not match the recomputed preimage hash",
            ),
            Err(e) => checks.fail("canonical-hash", ReasonCode::CanonicalHashMismatch, e.to_string()),
        }
    }

    // ── Typed shape + finding-level checks ────────────────────────────────
    let typed: Option<CanonReport> = canon_value.as_ref().and_then(|value| {
        match serde_json::from_value::<CanonReport>(value.clone()) {
            Ok(report) => Some(report),
            Err(e) => {
                checks.fail(
                    "report-shape",
                    ReasonCode::CanonReportUnreadable,
                    format!("canonical report does not match the report shape: {e}"),
                );
                None
            }
        }
    });

    if let Some(report) = &typed {
        check_finding_ids(&mut checks, report);
        check_finding_order(&mut checks, report);
        check_summary(&mut checks, report);
    }

    // ── Audit chain re-walk ───────────────────────────────────────────────
    let audit_path = dir.join(AUDIT_LOG_FILE);
    if !audit_path.is_file() {
        checks.soft(
            "audit-chain",
            ReasonCode::AuditLogAbsent,
            "no audit log in the export directory; chain not re-verified",
        );
    } else {
        match read_ndjson(&audit_path).and_then(|events| {
            verify_chain(&events).map(|verification| (events, verification))
        }) {
            // An unparseable log, or one whose events cannot even be
            // rehashed, is a failed check — never an aborted run.
            Err(e) => {
                let code = match &e {
                    CasegateError::IntegrityViolation { code, .. } => *code,
                    _ => ReasonCode::AuditLogUnreadable,
                };
                checks.fail("audit-chain", code, e.to_string());
            }
            Ok((events, verification)) => {
                if verification.breaks.is_empty() {
                    checks.pass("audit-chain", format!("chain intact over {} events", events.len()));
                } else {
                    let seqs: Vec<String> =
                        verification.breaks.iter().map(|b| b.seq.to_string()).collect();
                    checks.fail(
                        "audit-chain",
                        ReasonCode::ChainBrokenAtSeq,
                        format!("chain broken at seq {}", seqs.join(", ")),
                    );
                }
                if !verification.seq_violations.is_empty() {
                    checks.fail(
                        "audit-seq",
                        ReasonCode::SeqNonMonotonic,
                        format!("non-monotonic seq at {:?}", verification.seq_violations),
                    );
                }
                if !verification.timestamp_regressions.is_empty() {
                    checks.soft(
                        "audit-timestamps",
                        ReasonCode::TimestampNonMonotonic,
                        format!(
                            "timestamp regression at seq {:?}",
                            verification.timestamp_regressions
                        ),
                    );
                }
                if let Some(report) = &typed {
                    if report.inputs_digest.audit_head_sha256 == verification.final_hash {
                        checks.pass("audit-head", "audit_head_sha256 matches recomputed chain head");
                    } else {
                        checks.fail(
                            "audit-head",
                            ReasonCode::AuditHeadMismatch,
                            format!(
                                "claimed audit head {} but recomputed {}",
                                report.inputs_digest.audit_head_sha256, verification.final_hash
                            ),
                        );
                    }
                }
            }
        }
    }

    // ── JSON-Schema contract ──────────────────────────────────────────────
    if let Some(value) = &canon_value {
        let schema = load_schema(opts.schema.as_deref())?;
        let failures = validate(value, &schema);
        if failures.is_empty() {
            checks.pass("schema", "canonical report satisfies the contract schema");
        } else {
            let details: Vec<String> = failures
                .iter()
                .map(|f| format!("{}: {}", f.path, f.reason))
                .collect();
            checks.fail("schema", ReasonCode::SchemaViolation, details.join("; "));
        }
    }

    // ── Golden fixture diff ───────────────────────────────────────────────
    if let (Some(golden_path), Some(value)) = (&opts.golden, &canon_value) {
        let text = std::fs::read_to_string(golden_path).map_err(|e| {
            CasegateError::ExecutionError {
                reason: format!("failed to read golden '{}': {}", golden_path.display(), e),
            }
        })?;
        let golden: Value =
            serde_json::from_str(&text).map_err(|e| CasegateError::ExecutionError {
                reason: format!("golden '{}' is not valid JSON: {}", golden_path.display(), e),
            })?;
        let diff = diff_reports(value, &golden);
        if diff.is_empty() {
            checks.pass("golden", "report matches the golden fixture");
        } else {
            checks.fail("golden", ReasonCode::GoldenMismatch, diff.summary());
        }
    }

    // ── Fold ──────────────────────────────────────────────────────────────
    let checks = checks.0;
    let any_fail = checks.iter().any(|c| c.status == CheckStatus::Fail);
    let any_soft = checks.iter().any(|c| c.status == CheckStatus::Soft);
    let result = if any_fail || (any_soft && opts.config.checks.soft_checks_fatal) {
        VerifyResult::Fail
    } else {
        VerifyResult::Pass
    };

    info!(dir = %dir.display(), ?result, check_count = checks.len(), "verification complete");
    Ok(VerifyReport { result, checks })
}

fn all_findings(report: &CanonReport) -> impl Iterator<Item = &Finding> {
    report.violations.iter().chain(report.warnings.iter())
}

/// Uniqueness scan plus per-finding id re-derivation.
fn check_finding_ids(checks: &mut Checks, report: &CanonReport) {
    let mut seen: BTreeMap<&str, u32> = BTreeMap::new();
    for f in all_findings(report) {
        *seen.entry(f.id.as_str()).or_default() += 1;
    }
    let duplicates: Vec<&str> = seen
        .iter()
        .filter(|(_, n)| **n > 1)
        .map(|(id, _)| *id)
        .collect();
    if duplicates.is_empty() {
        checks.pass("finding-uniqueness", "no duplicate finding ids");
    } else {
        checks.fail(
            "finding-uniqueness",
            ReasonCode::DuplicateFindingId,
            format!("duplicate finding ids: {}", duplicates.join(", ")),
        );
    }

    let mismatched: Vec<&str> = all_findings(report)
        .filter(|f| {
            let expected = finding_id(
                &f.gate_id,
                &f.code,
                &f.sub_code,
                f.severity,
                &f.object.object_type,
                &f.object.id,
            )
            .to_string();
            expected != f.id
        })
        .map(|f| f.id.as_str())
        .collect();
    if mismatched.is_empty() {
        checks.pass("finding-ids", "every finding id re-derives from its structural fields");
    } else {
        checks.fail(
            "finding-ids",
            ReasonCode::FindingIdMismatch,
            format!("finding ids do not re-derive: {}", mismatched.join(", ")),
        );
    }
}

/// Both arrays must be in the canonical finding order.
fn check_finding_order(checks: &mut Checks, report: &CanonReport) {
    let sorted = |findings: &[Finding]| {
        findings
            .windows(2)
            .all(|w| w[0].sort_key() <= w[1].sort_key())
    };
    if sorted(&report.violations) && sorted(&report.warnings) {
        checks.pass("finding-order", "findings are canonically sorted");
    } else {
        checks.fail(
            "finding-order",
            ReasonCode::FindingOrderInvalid,
            "violations/warnings are not in canonical finding order",
        );
    }
}

/// Recompute the summary from the arrays and compare with the claim.
fn check_summary(checks: &mut Checks, report: &CanonReport) {
    use casegate_contracts::finding::Severity;
    use casegate_contracts::report::ReportStatus;

    let mut problems = Vec::new();

    if report.violations.iter().any(|f| f.severity != Severity::Block) {
        problems.push("violations contains a non-BLOCK finding".to_string());
    }
    if report.warnings.iter().any(|f| f.severity == Severity::Block) {
        problems.push("warnings contains a BLOCK finding".to_string());
    }

    let block = all_findings(report).filter(|f| f.severity == Severity::Block).count() as u64;
    let warn = all_findings(report).filter(|f| f.severity == Severity::Warn).count() as u64;
    let info = all_findings(report).filter(|f| f.severity == Severity::Info).count() as u64;
    if (block, warn, info)
        != (
            report.summary.block_count,
            report.summary.warn_count,
            report.summary.info_count,
        )
    {
        problems.push(format!(
            "claimed counts ({}, {}, {}) but recomputed ({block}, {warn}, {info})",
            report.summary.block_count, report.summary.warn_count, report.summary.info_count
        ));
    }

    let expected_status = if report.violations.is_empty() {
        ReportStatus::Pass
    } else {
        ReportStatus::Fail
    };
    if report.summary.status != expected_status {
        problems.push("status is not a pure function of violations".to_string());
    }

    if problems.is_empty() {
        checks.pass("summary", "summary re-derives from the findings");
    } else {
        debug!(?problems, "summary inconsistency");
        checks.fail("summary", ReasonCode::SummaryInconsistent, problems.join("; "));
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::{verify_export, CheckStatus, VerifyOptions, VerifyResult};
    use casegate_contracts::error::{CasegateError, ReasonCode};
    use casegate_export::CANON_FILE;
    use casegate_scenarios::{produce_export, scenario};

    fn export(name: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let pack = scenario(name).unwrap();
        produce_export(&pack, dir.path()).unwrap();
        dir
    }

    fn find<'r>(report: &'r super::VerifyReport, name: &str) -> &'r super::Check {
        report
            .checks
            .iter()
            .find(|c| c.name == name)
            .unwrap_or_else(|| panic!("missing check '{name}'"))
    }

    #[test]
    fn clean_export_passes_every_check() {
        let dir = export("pass");
        let report = verify_export(dir.path(), &VerifyOptions::default()).unwrap();

        assert_eq!(report.result, VerifyResult::Pass);
        assert!(
            report.checks.iter().all(|c| c.status == CheckStatus::Pass),
            "checks: {:?}",
            report.checks
        );
    }

    /// A failing scenario is still a *valid* export — the verifier checks
    /// integrity, not gate outcomes.
    #[test]
    fn failing_scenario_still_verifies() {
        let dir = export("missing-basis");
        let report = verify_export(dir.path(), &VerifyOptions::default()).unwrap();
        assert_eq!(report.result, VerifyResult::Pass);
    }

    #[test]
    fn missing_directory_is_an_execution_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = verify_export(&dir.path().join("nope"), &VerifyOptions::default()).unwrap_err();
        assert!(matches!(err, CasegateError::ExecutionError { .. }));
    }

    #[test]
    fn missing_canon_file_fails_with_named_code() {
        let dir = export("pass");
        std::fs::remove_file(dir.path().join(CANON_FILE)).unwrap();

        let report = verify_export(dir.path(), &VerifyOptions::default()).unwrap();
        assert_eq!(report.result, VerifyResult::Fail);
        let check = find(&report, "canon-file-presence");
        assert_eq!(check.reason_code, Some(ReasonCode::ExportFileMissing));
    }

    /// Altering the sealed hash post hoc without recomputation fails the
    /// canonical-hash check.
    #[test]
    fn altered_hash_is_detected() {
        let dir = export("pass");
        let path = dir.path().join(CANON_FILE);
        let mut value: Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        *value.pointer_mut("/inputs_digest/canonical_sha256").unwrap() = "ee".repeat(32).into();
        std::fs::write(&path, serde_json::to_string(&value).unwrap()).unwrap();

        let report = verify_export(dir.path(), &VerifyOptions::default()).unwrap();
        assert_eq!(report.result, VerifyResult::Fail);
        let check = find(&report, "canonical-hash");
        assert_eq!(check.reason_code, Some(ReasonCode::CanonicalHashMismatch));
    }

    /// Editing report content without resealing breaks the hash and the
    /// summary recomputation, and both are reported.
    #[test]
    fn all_checks_run_after_a_failure() {
        let dir = export("pass");
        let path = dir.path().join(CANON_FILE);
        let mut value: Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        *value.pointer_mut("/summary/block_count").unwrap() = 9.into();
        std::fs::write(&path, serde_json::to_string(&value).unwrap()).unwrap();

        let report = verify_export(dir.path(), &VerifyOptions::default()).unwrap();
        assert_eq!(report.result, VerifyResult::Fail);
        assert_eq!(find(&report, "canonical-hash").status, CheckStatus::Fail);
        assert_eq!(find(&report, "summary").status, CheckStatus::Fail);
        // Later checks still ran.
        assert_eq!(find(&report, "schema").status, CheckStatus::Pass);
    }

    #[test]
    fn duplicate_finding_id_is_rejected() {
        let dir = export("missing-basis");
        let path = dir.path().join(CANON_FILE);
        let mut value: Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        // Duplicate the single violation; reseal so only uniqueness fails.
        let violation = value["violations"][0].clone();
        value["violations"].as_array_mut().unwrap().push(violation);
        value["summary"]["block_count"] = 2.into();
        let resealed = casegate_export::compute_canonical_hash(&value).unwrap();
        *value.pointer_mut("/inputs_digest/canonical_sha256").unwrap() = resealed.into();
        std::fs::write(&path, serde_json::to_string(&value).unwrap()).unwrap();

        let report = verify_export(dir.path(), &VerifyOptions::default()).unwrap();
        assert_eq!(report.result, VerifyResult::Fail);
        let check = find(&report, "finding-uniqueness");
        assert_eq!(check.reason_code, Some(ReasonCode::DuplicateFindingId));
    }

    #[test]
    fn tampered_audit_log_breaks_the_chain_check() {
        let dir = export("pass");
        let path = dir.path().join(casegate_export::AUDIT_LOG_FILE);
        let text = std::fs::read_to_string(&path).unwrap();
        // Flip a byte in one event's details without recomputing its hash.
        let tampered = text.replacen("case_opened", "case_reopend", 1);
        assert_ne!(text, tampered);
        std::fs::write(&path, tampered).unwrap();

        let report = verify_export(dir.path(), &VerifyOptions::default()).unwrap();
        assert_eq!(report.result, VerifyResult::Fail);
        let check = find(&report, "audit-chain");
        assert_eq!(check.reason_code, Some(ReasonCode::ChainBrokenAtSeq));
    }

    /// An event rewritten with a float in `details` cannot be rehashed at
    /// all — that still surfaces as a failed chain check, and the
    /// remaining checks run to completion.
    #[test]
    fn unhashable_audit_event_fails_the_chain_check_without_aborting() {
        let dir = export("pass");
        let path = dir.path().join(casegate_export::AUDIT_LOG_FILE);
        let mut events = casegate_audit::read_ndjson(&path).unwrap();
        events[2].details = serde_json::json!({"confidence": 0.5});
        casegate_audit::write_ndjson(&path, &events).unwrap();

        let report = verify_export(dir.path(), &VerifyOptions::default()).unwrap();
        assert_eq!(report.result, VerifyResult::Fail);
        let check = find(&report, "audit-chain");
        assert_eq!(check.status, CheckStatus::Fail);
        assert_eq!(check.reason_code, Some(ReasonCode::NonIntegerNumber));
        // The pass completed: checks after the chain walk still ran.
        assert_eq!(find(&report, "schema").status, CheckStatus::Pass);
    }

    /// Absent audit log is soft by default, fatal when configured.
    #[test]
    fn absent_audit_log_is_soft_unless_configured() {
        let dir = export("pass");
        std::fs::remove_file(dir.path().join(casegate_export::AUDIT_LOG_FILE)).unwrap();

        let report = verify_export(dir.path(), &VerifyOptions::default()).unwrap();
        assert_eq!(report.result, VerifyResult::Pass);
        assert_eq!(find(&report, "audit-chain").status, CheckStatus::Soft);

        let strict = VerifyOptions {
            config: crate::config::VerifyConfig::from_toml_str(
                "[checks]\nsoft_checks_fatal = true\n",
            )
            .unwrap(),
            ..Default::default()
        };
        let report = verify_export(dir.path(), &strict).unwrap();
        assert_eq!(report.result, VerifyResult::Fail);
    }

    #[test]
    fn golden_diff_passes_on_identical_export_and_fails_on_divergence() {
        let dir = export("pass");
        let golden_path = dir.path().join("golden.json");
        std::fs::copy(dir.path().join(CANON_FILE), &golden_path).unwrap();

        let opts = VerifyOptions {
            golden: Some(golden_path.clone()),
            ..Default::default()
        };
        let report = verify_export(dir.path(), &opts).unwrap();
        assert_eq!(report.result, VerifyResult::Pass);

        // Diverge the golden's summary.
        let mut golden: Value =
            serde_json::from_str(&std::fs::read_to_string(&golden_path).unwrap()).unwrap();
        *golden.pointer_mut("/case_id").unwrap() = "other-case".into();
        std::fs::write(&golden_path, serde_json::to_string(&golden).unwrap()).unwrap();

        let report = verify_export(dir.path(), &opts).unwrap();
        assert_eq!(report.result, VerifyResult::Fail);
        assert_eq!(
            find(&report, "golden").reason_code,
            Some(ReasonCode::GoldenMismatch)
        );
    }

    /// Running the verifier twice on the same directory yields the same
    /// result — stateless and re-entrant.
    #[test]
    fn verification_is_reentrant() {
        let dir = export("contradiction");
        let one = verify_export(dir.path(), &VerifyOptions::default()).unwrap();
        let two = verify_export(dir.path(), &VerifyOptions::default()).unwrap();
        assert_eq!(one.result, two.result);
        assert_eq!(one.checks.len(), two.checks.len());
    }
}
