//! Scenario: a wide case with a long audit chain.
//!
//! Thirty evidence items, thirty claims, eight opinions, and roughly five
//! hundred audit events. Every seventh evidence item is missing its
//! content hash, so the reference-integrity gate raises WARNs while the
//! report still comes out PASS. Exists to exercise ordering, dedup, and
//! hashing beyond toy sizes while remaining fully deterministic.

use serde_json::json;

use casegate_audit::AuditLogBuilder;
use casegate_contracts::{
    case::{CaseFile, CaseMetadata, Claim, EvidenceItem, Limitation, Opinion},
    error::CasegateResult,
};

use crate::pack::ScenarioPack;

const BASE_TS_MS: i64 = 1_763_000_000_000;

const EVIDENCE_COUNT: usize = 30;
const CLAIM_COUNT: usize = 30;
const OPINION_COUNT: usize = 8;
// 1 case_opened + 30 evidence + 30 claims + 16 opinion-related
// + limitation + scope + filler = 500 events total.
const FILLER_EVENTS: usize = 421;

pub fn pack() -> CasegateResult<ScenarioPack> {
    let evidence: Vec<EvidenceItem> = (0..EVIDENCE_COUNT)
        .map(|i| EvidenceItem {
            id: format!("ev-{i:03}"),
            label: format!("Collected artifact {i:03}"),
            // Every seventh item lacks its content hash (a WARN, not a BLOCK).
            sha256: (i % 7 != 0).then(|| format!("{:064x}", 0x1000 + i)),
        })
        .collect();

    let claims: Vec<Claim> = (0..CLAIM_COUNT)
        .map(|i| Claim {
            id: format!("cl-{i:03}"),
            text: format!("Observation {i:03} derived from the collected artifacts."),
            evidence_refs: vec![
                format!("ev-{:03}", i % EVIDENCE_COUNT),
                format!("ev-{:03}", (i + 11) % EVIDENCE_COUNT),
            ],
        })
        .collect();

    let opinions: Vec<Opinion> = (0..OPINION_COUNT)
        .map(|i| {
            let ai_assisted = i % 2 == 0;
            Opinion {
                id: format!("op-{i:02}"),
                text: format!("Synthesis {i:02} over the supporting observations."),
                supporting_refs: vec![
                    format!("cl-{:03}", (i * 3) % CLAIM_COUNT),
                    format!("cl-{:03}", (i * 3 + 1) % CLAIM_COUNT),
                ],
                reasoning: format!("Observations {:03} and {:03} jointly support the synthesis.", (i * 3) % CLAIM_COUNT, (i * 3 + 1) % CLAIM_COUNT),
                what_would_change: "Contrary artifacts surfacing in the remaining collection.".to_string(),
                ai_assisted,
                authored_by_human: !ai_assisted,
            }
        })
        .collect();

    let limitation = Limitation {
        id: "lim-sampling".to_string(),
        description: "Artifacts were sampled; the full collection was not examined.".to_string(),
        status: Some("disclosed".to_string()),
        impact: Some("Unexamined artifacts could alter individual observations.".to_string()),
        discloses_contradiction: None,
    };

    let metadata = CaseMetadata {
        role: Some("lead examiner".to_string()),
        referral_question: Some("Do the collected artifacts support the working hypothesis?".to_string()),
        scope: Some("Sampled artifact review; no source-system acquisition.".to_string()),
    };

    let mut b = AuditLogBuilder::new(BASE_TS_MS);
    b.append("case_opened", json!({"case_id": "bx-2026-0500"}))?;
    for ev in &evidence {
        b.append(
            "evidence_ingested",
            json!({"evidence_id": ev.id, "label": ev.label, "sha256": ev.sha256}),
        )?;
    }
    for cl in &claims {
        b.append(
            "claim_recorded",
            json!({"claim_id": cl.id, "evidence_refs": cl.evidence_refs}),
        )?;
    }
    for op in &opinions {
        if op.ai_assisted {
            b.append("ai_content_generated", json!({"content_id": op.id}))?;
            b.append(
                "human_review",
                json!({"content_id": op.id, "outcome": "approve"}),
            )?;
        }
        b.append(
            "opinion_recorded",
            json!({
                "opinion_id": op.id,
                "supporting_refs": op.supporting_refs,
                "reasoning": op.reasoning,
                "what_would_change": op.what_would_change,
                "ai_assisted": op.ai_assisted,
                "authored_by_human": op.authored_by_human,
            }),
        )?;
    }
    b.append(
        "limitation_recorded",
        json!({
            "limitation_id": limitation.id,
            "description": limitation.description,
            "status": limitation.status,
            "impact": limitation.impact,
        }),
    )?;
    b.append(
        "scope_declared",
        json!({
            "role": metadata.role,
            "referral_question": metadata.referral_question,
            "scope": metadata.scope,
        }),
    )?;
    // Routine workflow noise: the chain is much longer than the case is wide.
    for i in 0..FILLER_EVENTS {
        b.append("workspace_activity", json!({"tick": i}))?;
    }

    Ok(ScenarioPack {
        name: "scale",
        case: CaseFile {
            case_id: "bx-2026-0500".to_string(),
            metadata: Some(metadata),
            opinions: Some(opinions),
            claims: Some(claims),
            evidence: Some(evidence),
            limitations: Some(vec![limitation]),
            contradictions: Some(vec![]),
        },
        events: b.into_events(),
    })
}
