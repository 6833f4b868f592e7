//! Scenario: a fully articulated case that clears every gate.
//!
//! One AI-drafted opinion with a complete basis and a recorded human
//! review, claims that resolve against hashed evidence, a disclosed
//! limitation, and a full scope declaration. The report comes out PASS
//! with no findings at all.

use serde_json::json;

use casegate_audit::AuditLogBuilder;
use casegate_contracts::{
    case::{CaseFile, CaseMetadata, Claim, EvidenceItem, Limitation, Opinion},
    error::CasegateResult,
};

use crate::pack::ScenarioPack;

const BASE_TS_MS: i64 = 1_760_000_000_000;

pub fn pack() -> CasegateResult<ScenarioPack> {
    let evidence = vec![
        EvidenceItem {
            id: "ev-scan-01".to_string(),
            label: "High-resolution scan of the questioned signature page".to_string(),
            sha256: Some("11".repeat(32)),
        },
        EvidenceItem {
            id: "ev-exemplar-02".to_string(),
            label: "Known signature exemplars, 2019-2023".to_string(),
            sha256: Some("22".repeat(32)),
        },
        EvidenceItem {
            id: "ev-ink-03".to_string(),
            label: "Ink chromatography report".to_string(),
            sha256: Some("33".repeat(32)),
        },
    ];

    let claims = vec![
        Claim {
            id: "cl-ink-match".to_string(),
            text: "The questioned entry and the page header were written with the same ink formulation.".to_string(),
            evidence_refs: vec!["ev-ink-03".to_string(), "ev-scan-01".to_string()],
        },
        Claim {
            id: "cl-letterform".to_string(),
            text: "Letterform proportions are consistent across the questioned signature and the exemplars.".to_string(),
            evidence_refs: vec!["ev-scan-01".to_string(), "ev-exemplar-02".to_string()],
        },
    ];

    let opinion = Opinion {
        id: "op-authorship".to_string(),
        text: "The questioned signature is consistent with the known exemplars.".to_string(),
        supporting_refs: vec!["cl-ink-match".to_string(), "cl-letterform".to_string()],
        reasoning: "Ink consistency and stable letterform proportions across five years of exemplars support common authorship.".to_string(),
        what_would_change: "Exemplars from the disputed period showing materially different letterform habits.".to_string(),
        ai_assisted: true,
        authored_by_human: false,
    };

    let limitation = Limitation {
        id: "lim-exemplar-gap".to_string(),
        description: "No exemplars are available from the six months surrounding the disputed date.".to_string(),
        status: Some("disclosed".to_string()),
        impact: Some("Conclusions are qualified; short-term habit drift cannot be excluded.".to_string()),
        discloses_contradiction: None,
    };

    let metadata = CaseMetadata {
        role: Some("consulting document examiner".to_string()),
        referral_question: Some("Was the questioned signature written by the account holder?".to_string()),
        scope: Some("Examination limited to the supplied scans and exemplars; no chemical dating performed.".to_string()),
    };

    let mut b = AuditLogBuilder::new(BASE_TS_MS);
    b.append("case_opened", json!({"case_id": "qd-2026-0114"}))?;
    for ev in &evidence {
        b.append(
            "evidence_ingested",
            json!({"evidence_id": ev.id, "label": ev.label, "sha256": ev.sha256}),
        )?;
    }
    for cl in &claims {
        b.append(
            "claim_recorded",
            json!({"claim_id": cl.id, "text": cl.text, "evidence_refs": cl.evidence_refs}),
        )?;
    }
    b.append("ai_content_generated", json!({"content_id": opinion.id}))?;
    b.append(
        "human_review",
        json!({"content_id": opinion.id, "outcome": "approve_with_edits"}),
    )?;
    b.append(
        "opinion_recorded",
        json!({
            "opinion_id": opinion.id,
            "text": opinion.text,
            "supporting_refs": opinion.supporting_refs,
            "reasoning": opinion.reasoning,
            "what_would_change": opinion.what_would_change,
            "ai_assisted": opinion.ai_assisted,
            "authored_by_human": opinion.authored_by_human,
        }),
    )?;
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

    Ok(ScenarioPack {
        name: "pass",
        case: CaseFile {
            case_id: "qd-2026-0114".to_string(),
            metadata: Some(metadata),
            opinions: Some(vec![opinion]),
            claims: Some(claims),
            evidence: Some(evidence),
            limitations: Some(vec![limitation]),
            contradictions: Some(vec![]),
        },
        events: b.into_events(),
    })
}
