//! Gate trait, static registry, and the evaluation merge.
//!
//! The catalog is an ordered list of stateless gate values built fresh by
//! `registry()` — no singletons, nothing to reset, safe to call from any
//! thread. Outcome fold per gate: any BLOCK finding ⇒ FAIL; any WARN/INFO
//! on an otherwise clean gate ⇒ WARN; otherwise PASS, including the
//! zero-applicable-objects case (`checked: 0`).

use std::collections::BTreeMap;

use tracing::debug;

use casegate_contracts::{
    audit::AuditEvent,
    case::CaseFile,
    finding::{Finding, Severity},
    report::GateOutcome,
};

use crate::fallback::CaseView;
use crate::gates;

/// What one gate reports back: how many objects it examined and every
/// finding it raised.
#[derive(Debug)]
pub struct GateEvaluation {
    pub gate_id: &'static str,
    pub checked: usize,
    pub findings: Vec<Finding>,
}

impl GateEvaluation {
    /// Fold this gate's findings into its outcome.
    pub fn outcome(&self) -> GateOutcome {
        if self.findings.iter().any(|f| f.severity == Severity::Block) {
            GateOutcome::Fail
        } else if !self.findings.is_empty() {
            GateOutcome::Warn
        } else {
            GateOutcome::Pass
        }
    }
}

/// A single pure rule evaluator.
///
/// Implementations hold no mutable state and must not touch I/O, clocks,
/// or randomness — the same view must always produce the same evaluation.
pub trait Gate: Send + Sync {
    /// Stable gate identifier, used as the `gate_outcomes` key and in
    /// finding ids.
    fn id(&self) -> &'static str;

    fn evaluate(&self, view: &CaseView<'_>) -> GateEvaluation;
}

/// The static gate catalog, in canonical declaration order.
pub fn registry() -> Vec<Box<dyn Gate>> {
    vec![
        Box::new(gates::basis::BasisRequired),
        Box::new(gates::open_items::OpenItems),
        Box::new(gates::oversight::HumanOversight),
        Box::new(gates::conflict::ConflictResolution),
        Box::new(gates::reference::ReferenceIntegrity),
        Box::new(gates::escalation::Escalation),
        Box::new(gates::scope::ScopeDeclaration),
    ]
}

/// Merged output of a full engine run.
#[derive(Debug)]
pub struct EngineOutput {
    /// All findings from all gates, in registry order (unsorted — the
    /// assembler applies the canonical sort before serialization).
    pub findings: Vec<Finding>,

    pub gate_outcomes: BTreeMap<String, GateOutcome>,

    /// Objects examined per gate, for diagnostics.
    pub checked: BTreeMap<String, usize>,
}

/// Run every registered gate over `(case, audit)` and merge the results.
///
/// Gates are independent: one gate's findings never influence another's,
/// and the merge happens only after all gates complete.
pub fn evaluate(case: &CaseFile, audit: &[AuditEvent]) -> EngineOutput {
    let view = CaseView::new(case, audit);

    let mut findings = Vec::new();
    let mut gate_outcomes = BTreeMap::new();
    let mut checked = BTreeMap::new();

    for gate in registry() {
        let evaluation = gate.evaluate(&view);
        debug!(
            gate_id = evaluation.gate_id,
            checked = evaluation.checked,
            finding_count = evaluation.findings.len(),
            outcome = ?evaluation.outcome(),
            "gate evaluated"
        );

        gate_outcomes.insert(evaluation.gate_id.to_string(), evaluation.outcome());
        checked.insert(evaluation.gate_id.to_string(), evaluation.checked);
        findings.extend(evaluation.findings);
    }

    EngineOutput {
        findings,
        gate_outcomes,
        checked,
    }
}

/// Construct a finding with its content-derived id. Shared by every gate.
pub(crate) fn finding(
    gate_id: &'static str,
    code: &str,
    sub_code: &str,
    severity: Severity,
    object_type: &str,
    object_id: &str,
    message: String,
    remediation_hint: Option<&str>,
) -> Finding {
    let id = casegate_canon::finding_id(gate_id, code, sub_code, severity, object_type, object_id);
    Finding {
        id: id.to_string(),
        gate_id: gate_id.to_string(),
        code: code.to_string(),
        sub_code: sub_code.to_string(),
        severity,
        message,
        remediation_hint: remediation_hint.map(str::to_string),
        spec_reference: None,
        object: casegate_contracts::finding::FindingObject {
            object_type: object_type.to_string(),
            id: object_id.to_string(),
        },
    }
}
