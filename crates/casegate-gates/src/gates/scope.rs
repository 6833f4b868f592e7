//! Scope-declaration gate.
//!
//! Top-level case metadata should declare the examiner's role, the
//! referral question, and the scope of review. Missing declarations are
//! WARN — the export remains valid but a consumer should know the frame
//! was never pinned down.

use casegate_contracts::finding::Severity;

use crate::engine::{finding, Gate, GateEvaluation};
use crate::fallback::CaseView;

pub const GATE_ID: &str = "scope-declaration";
pub const CODE: &str = "SCOPE_UNDECLARED";

pub struct ScopeDeclaration;

fn check_declared(
    findings: &mut Vec<casegate_contracts::finding::Finding>,
    case_id: &str,
    value: &Option<String>,
    sub_code: &str,
    what: &str,
) {
    if value.as_deref().map_or(true, |s| s.trim().is_empty()) {
        findings.push(finding(
            GATE_ID,
            CODE,
            sub_code,
            Severity::Warn,
            "case",
            case_id,
            format!("case metadata does not declare {what}"),
            Some("complete the case scope declaration"),
        ));
    }
}

impl Gate for ScopeDeclaration {
    fn id(&self) -> &'static str {
        GATE_ID
    }

    fn evaluate(&self, view: &CaseView<'_>) -> GateEvaluation {
        let metadata = view.metadata().unwrap_or_default();
        let case_id = view.case_id();
        let mut findings = Vec::new();

        check_declared(&mut findings, case_id, &metadata.role, "NO_ROLE", "the examiner's role");
        check_declared(
            &mut findings,
            case_id,
            &metadata.referral_question,
            "NO_REFERRAL_QUESTION",
            "the referral question",
        );
        check_declared(&mut findings, case_id, &metadata.scope, "NO_SCOPE", "the scope of review");

        GateEvaluation {
            gate_id: GATE_ID,
            checked: 1,
            findings,
        }
    }
}
