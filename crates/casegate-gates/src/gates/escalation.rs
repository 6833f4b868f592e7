//! Escalation gate.
//!
//! Opinions touching a restricted, high-stakes category (keyword-matched)
//! require either a gate-triggered human sign-off event or direct human
//! authorship with no AI assistance. A machine-assisted high-stakes
//! conclusion with neither is a BLOCK.

use std::collections::BTreeSet;

use casegate_contracts::{audit::SignoffDetails, finding::Severity};

use crate::engine::{finding, Gate, GateEvaluation};
use crate::fallback::CaseView;

pub const GATE_ID: &str = "escalation";
pub const CODE: &str = "HIGH_STAKES_UNSIGNED";

/// Keyword triggers for the restricted category. Matching is
/// case-insensitive substring over the opinion text.
pub const RESTRICTED_KEYWORDS: [&str; 6] = [
    "cause of death",
    "manner of death",
    "criminal responsibility",
    "fitness to stand trial",
    "risk of violence",
    "testamentary capacity",
];

fn is_restricted(text: &str) -> bool {
    let lowered = text.to_lowercase();
    RESTRICTED_KEYWORDS.iter().any(|k| lowered.contains(k))
}

pub struct Escalation;

impl Gate for Escalation {
    fn id(&self) -> &'static str {
        GATE_ID
    }

    fn evaluate(&self, view: &CaseView<'_>) -> GateEvaluation {
        let signed_off: BTreeSet<String> = view
            .typed_events::<SignoffDetails>("human_signoff")
            .into_iter()
            .map(|d| d.object_id)
            .collect();

        let mut checked = 0;
        let mut findings = Vec::new();

        for opinion in view.opinions() {
            if !is_restricted(&opinion.text) {
                continue;
            }
            checked += 1;

            let directly_authored = opinion.authored_by_human && !opinion.ai_assisted;
            if directly_authored || signed_off.contains(&opinion.id) {
                continue;
            }

            findings.push(finding(
                GATE_ID,
                CODE,
                "NO_HUMAN_SIGNOFF",
                Severity::Block,
                "opinion",
                &opinion.id,
                format!(
                    "opinion '{}' reaches a restricted-category conclusion without human sign-off",
                    opinion.id
                ),
                Some("record a human_signoff event or have the conclusion authored directly"),
            ));
        }

        GateEvaluation {
            gate_id: GATE_ID,
            checked,
            findings,
        }
    }
}
