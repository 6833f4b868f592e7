//! Basis-required gate.
//!
//! Every opinion-like object needs a defensible basis: at least one
//! supporting reference, a non-empty reasoning narrative, and explicit
//! revision criteria ("what would change this opinion"). Each missing
//! sub-condition raises its own BLOCK finding so remediation can be
//! tracked per condition.

use casegate_contracts::finding::Severity;

use crate::engine::{finding, Gate, GateEvaluation};
use crate::fallback::CaseView;

pub const GATE_ID: &str = "basis-required";
pub const CODE: &str = "OPINION_NO_BASIS";

pub struct BasisRequired;

impl Gate for BasisRequired {
    fn id(&self) -> &'static str {
        GATE_ID
    }

    fn evaluate(&self, view: &CaseView<'_>) -> GateEvaluation {
        let opinions = view.opinions();
        let mut findings = Vec::new();

        for opinion in &opinions {
            if opinion.supporting_refs.is_empty() {
                findings.push(finding(
                    GATE_ID,
                    CODE,
                    "NO_SUPPORTING_ANCHORS",
                    Severity::Block,
                    "opinion",
                    &opinion.id,
                    format!("opinion '{}' cites no supporting references", opinion.id),
                    Some("anchor the opinion to at least one evidence item or source"),
                ));
            }
            if opinion.reasoning.trim().is_empty() {
                findings.push(finding(
                    GATE_ID,
                    CODE,
                    "NO_REASONING",
                    Severity::Block,
                    "opinion",
                    &opinion.id,
                    format!("opinion '{}' has no reasoning narrative", opinion.id),
                    Some("record how the supporting material leads to the conclusion"),
                ));
            }
            if opinion.what_would_change.trim().is_empty() {
                findings.push(finding(
                    GATE_ID,
                    CODE,
                    "NO_REVISION_CRITERIA",
                    Severity::Block,
                    "opinion",
                    &opinion.id,
                    format!(
                        "opinion '{}' does not state what evidence would change it",
                        opinion.id
                    ),
                    Some("state the observations that would revise the opinion"),
                ));
            }
        }

        GateEvaluation {
            gate_id: GATE_ID,
            checked: opinions.len(),
            findings,
        }
    }
}
