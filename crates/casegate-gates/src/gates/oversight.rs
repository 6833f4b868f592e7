//! Human-oversight gate.
//!
//! Every `ai_content_generated` event needs a matching `human_review`
//! event whose outcome is in the fixed review vocabulary. AI-drafted
//! content that no human has dispositioned — or was dispositioned with an
//! unrecognized outcome — is a BLOCK.

use std::collections::BTreeSet;

use casegate_contracts::{
    audit::{AiContentDetails, HumanReviewDetails},
    finding::Severity,
};

use crate::engine::{finding, Gate, GateEvaluation};
use crate::fallback::CaseView;

pub const GATE_ID: &str = "human-oversight";
pub const CODE: &str = "AI_CONTENT_UNREVIEWED";

/// The only outcomes that count as human oversight. A `reject` is still
/// oversight — the human looked and decided.
pub const REVIEW_OUTCOMES: [&str; 4] =
    ["approve", "approve_with_edits", "partial_accept", "reject"];

pub struct HumanOversight;

impl Gate for HumanOversight {
    fn id(&self) -> &'static str {
        GATE_ID
    }

    fn evaluate(&self, view: &CaseView<'_>) -> GateEvaluation {
        let generated: BTreeSet<String> = view
            .typed_events::<AiContentDetails>("ai_content_generated")
            .into_iter()
            .map(|d| d.content_id)
            .collect();
        let reviews: Vec<HumanReviewDetails> = view.typed_events("human_review");

        let mut findings = Vec::new();
        for content_id in &generated {
            let matching: Vec<&HumanReviewDetails> =
                reviews.iter().filter(|r| &r.content_id == content_id).collect();

            if matching.is_empty() {
                findings.push(finding(
                    GATE_ID,
                    CODE,
                    "NO_REVIEW_EVENT",
                    Severity::Block,
                    "ai_content",
                    content_id,
                    format!("AI-generated content '{content_id}' has no human review event"),
                    Some("record a human review with an explicit outcome"),
                ));
            } else if !matching
                .iter()
                .any(|r| REVIEW_OUTCOMES.contains(&r.outcome.as_str()))
            {
                findings.push(finding(
                    GATE_ID,
                    CODE,
                    "OUTCOME_NOT_RECOGNIZED",
                    Severity::Block,
                    "ai_content",
                    content_id,
                    format!(
                        "AI-generated content '{content_id}' was reviewed with an unrecognized outcome"
                    ),
                    Some("use one of: approve, approve_with_edits, partial_accept, reject"),
                ));
            }
        }

        GateEvaluation {
            gate_id: GATE_ID,
            checked: generated.len(),
            findings,
        }
    }
}
