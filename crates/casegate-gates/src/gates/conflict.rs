//! Conflict-resolution gate.
//!
//! Every detected pairwise contradiction needs either a
//! `contradiction_resolved` audit event or a limitation that explicitly
//! discloses it as unresolved. A contradiction that is neither resolved
//! nor disclosed would silently undermine the export — BLOCK.

use std::collections::BTreeSet;

use casegate_contracts::{audit::ContradictionResolvedDetails, finding::Severity};

use crate::engine::{finding, Gate, GateEvaluation};
use crate::fallback::CaseView;

pub const GATE_ID: &str = "conflict-resolution";
pub const CODE: &str = "CONTRADICTION_UNRESOLVED";

pub struct ConflictResolution;

impl Gate for ConflictResolution {
    fn id(&self) -> &'static str {
        GATE_ID
    }

    fn evaluate(&self, view: &CaseView<'_>) -> GateEvaluation {
        let contradictions = view.contradictions();

        let resolved: BTreeSet<String> = view
            .typed_events::<ContradictionResolvedDetails>("contradiction_resolved")
            .into_iter()
            .map(|d| d.contradiction_id)
            .collect();
        let disclosed: BTreeSet<String> = view
            .limitations()
            .into_iter()
            .filter_map(|l| l.discloses_contradiction)
            .collect();

        let mut findings = Vec::new();
        for contradiction in &contradictions {
            if resolved.contains(&contradiction.id) || disclosed.contains(&contradiction.id) {
                continue;
            }
            findings.push(finding(
                GATE_ID,
                CODE,
                "NO_RESOLUTION_OR_DISCLOSURE",
                Severity::Block,
                "contradiction",
                &contradiction.id,
                format!(
                    "contradiction '{}' between claims '{}' and '{}' is neither resolved nor disclosed",
                    contradiction.id, contradiction.claim_a, contradiction.claim_b
                ),
                Some("resolve the contradiction or disclose it in a limitation"),
            ));
        }

        GateEvaluation {
            gate_id: GATE_ID,
            checked: contradictions.len(),
            findings,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{ConflictResolution, CODE};
    use crate::engine::Gate;
    use crate::fallback::CaseView;
    use casegate_contracts::{
        audit::AuditEvent,
        case::{CaseFile, Contradiction, Limitation},
        report::GateOutcome,
    };

    fn contradiction(id: &str) -> Contradiction {
        Contradiction {
            id: id.to_string(),
            claim_a: "cl-1".to_string(),
            claim_b: "cl-2".to_string(),
            description: "test scores vs observed function".to_string(),
        }
    }

    fn event(seq: u64, action: &str, details: serde_json::Value) -> AuditEvent {
        AuditEvent {
            seq,
            timestamp: seq as i64,
            action: action.to_string(),
            details,
            prev_hash: String::new(),
            chain_hash: String::new(),
        }
    }

    /// Scenario C: a contradiction with no resolution event and no
    /// disclosing limitation yields one BLOCK tagged CONTRADICTION_UNRESOLVED.
    #[test]
    fn undisclosed_contradiction_blocks() {
        let case = CaseFile {
            contradictions: Some(vec![contradiction("ct-1")]),
            ..Default::default()
        };
        let eval = ConflictResolution.evaluate(&CaseView::new(&case, &[]));
        assert_eq!(eval.findings.len(), 1);
        assert_eq!(eval.findings[0].code, CODE);
        assert_eq!(eval.findings[0].object.id, "ct-1");
        assert_eq!(eval.outcome(), GateOutcome::Fail);
    }

    #[test]
    fn resolution_event_clears_the_contradiction() {
        let case = CaseFile {
            contradictions: Some(vec![contradiction("ct-2")]),
            ..Default::default()
        };
        let audit = vec![event(
            0,
            "contradiction_resolved",
            json!({"contradiction_id": "ct-2", "resolution": "collateral interview reconciled accounts"}),
        )];

        let eval = ConflictResolution.evaluate(&CaseView::new(&case, &audit));
        assert!(eval.findings.is_empty());
    }

    #[test]
    fn disclosing_limitation_clears_the_contradiction() {
        let case = CaseFile {
            contradictions: Some(vec![contradiction("ct-3")]),
            limitations: Some(vec![Limitation {
                id: "lim-1".to_string(),
                description: "accounts conflict; disclosed".to_string(),
                status: Some("disclosed".to_string()),
                impact: Some("conclusion weighted accordingly".to_string()),
                discloses_contradiction: Some("ct-3".to_string()),
            }]),
            ..Default::default()
        };

        let eval = ConflictResolution.evaluate(&CaseView::new(&case, &[]));
        assert!(eval.findings.is_empty());
    }

    /// A resolution for a different contradiction does not clear this one.
    #[test]
    fn resolution_must_match_contradiction_id() {
        let case = CaseFile {
            contradictions: Some(vec![contradiction("ct-4")]),
            ..Default::default()
        };
        let audit = vec![event(
            0,
            "contradiction_resolved",
            json!({"contradiction_id": "ct-other"}),
        )];

        let eval = ConflictResolution.evaluate(&CaseView::new(&case, &audit));
        assert_eq!(eval.findings.len(), 1);
    }

    /// With no contradictions section, detection events from the audit log
    /// are judged instead.
    #[test]
    fn falls_back_to_detection_events() {
        let case = CaseFile::default();
        let audit = vec![event(
            0,
            "contradiction_detected",
            json!({"contradiction_id": "ct-5", "claim_a": "cl-1", "claim_b": "cl-2"}),
        )];

        let eval = ConflictResolution.evaluate(&CaseView::new(&case, &audit));
        assert_eq!(eval.checked, 1);
        assert_eq!(eval.findings.len(), 1);
        assert_eq!(eval.findings[0].object.id, "ct-5");
    }
}
