//! Open-items gate.
//!
//! Every registered limitation must carry a status and an impact
//! statement before export. An undated "known issue" with no assessed
//! impact is exactly the kind of item that gets forgotten — missing
//! either field is a BLOCK.

use casegate_contracts::finding::Severity;

use crate::engine::{finding, Gate, GateEvaluation};
use crate::fallback::CaseView;

pub const GATE_ID: &str = "open-items";
pub const CODE: &str = "LIMITATION_UNADDRESSED";

pub struct OpenItems;

impl Gate for OpenItems {
    fn id(&self) -> &'static str {
        GATE_ID
    }

    fn evaluate(&self, view: &CaseView<'_>) -> GateEvaluation {
        let limitations = view.limitations();
        let mut findings = Vec::new();

        for limitation in &limitations {
            if limitation.status.as_deref().map_or(true, |s| s.trim().is_empty()) {
                findings.push(finding(
                    GATE_ID,
                    CODE,
                    "NO_STATUS",
                    Severity::Block,
                    "limitation",
                    &limitation.id,
                    format!("limitation '{}' has no status", limitation.id),
                    Some("set the limitation status before export"),
                ));
            }
            if limitation.impact.as_deref().map_or(true, |s| s.trim().is_empty()) {
                findings.push(finding(
                    GATE_ID,
                    CODE,
                    "NO_IMPACT",
                    Severity::Block,
                    "limitation",
                    &limitation.id,
                    format!("limitation '{}' has no impact statement", limitation.id),
                    Some("state how the limitation affects the conclusions"),
                ));
            }
        }

        GateEvaluation {
            gate_id: GATE_ID,
            checked: limitations.len(),
            findings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::OpenItems;
    use crate::engine::Gate;
    use crate::fallback::CaseView;
    use casegate_contracts::{
        case::{CaseFile, Limitation},
        report::GateOutcome,
    };

    fn limitation(id: &str, status: Option<&str>, impact: Option<&str>) -> Limitation {
        Limitation {
            id: id.to_string(),
            description: "incomplete school records".to_string(),
            status: status.map(str::to_string),
            impact: impact.map(str::to_string),
            discloses_contradiction: None,
        }
    }

    #[test]
    fn addressed_limitation_passes() {
        let case = CaseFile {
            limitations: Some(vec![limitation(
                "lim-1",
                Some("acknowledged"),
                Some("premorbid estimate is less precise"),
            )]),
            ..Default::default()
        };
        let eval = OpenItems.evaluate(&CaseView::new(&case, &[]));
        assert!(eval.findings.is_empty());
        assert_eq!(eval.checked, 1);
    }

    #[test]
    fn missing_status_and_impact_each_block() {
        let case = CaseFile {
            limitations: Some(vec![limitation("lim-2", None, None)]),
            ..Default::default()
        };
        let eval = OpenItems.evaluate(&CaseView::new(&case, &[]));
        let subs: Vec<&str> = eval.findings.iter().map(|f| f.sub_code.as_str()).collect();
        assert_eq!(subs, vec!["NO_STATUS", "NO_IMPACT"]);
        assert_eq!(eval.outcome(), GateOutcome::Fail);
    }

    #[test]
    fn empty_string_status_counts_as_missing() {
        let case = CaseFile {
            limitations: Some(vec![limitation("lim-3", Some(""), Some("bounded"))]),
            ..Default::default()
        };
        let eval = OpenItems.evaluate(&CaseView::new(&case, &[]));
        assert_eq!(eval.findings.len(), 1);
        assert_eq!(eval.findings[0].sub_code, "NO_STATUS");
    }

    /// With no limitations section, the gate reconstructs from the audit
    /// log before judging.
    #[test]
    fn falls_back_to_limitation_recorded_events() {
        use casegate_contracts::audit::AuditEvent;
        use serde_json::json;

        let case = CaseFile::default();
        let audit = vec![AuditEvent {
            seq: 0,
            timestamp: 0,
            action: "limitation_recorded".to_string(),
            details: json!({"limitation_id": "lim-4", "status": "open"}),
            prev_hash: String::new(),
            chain_hash: String::new(),
        }];

        let eval = OpenItems.evaluate(&CaseView::new(&case, &audit));
        assert_eq!(eval.checked, 1);
        assert_eq!(eval.findings.len(), 1);
        assert_eq!(eval.findings[0].sub_code, "NO_IMPACT");
    }
}
