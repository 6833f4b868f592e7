//! Scenario: an opinion asserted without supporting anchors.
//!
//! The case is otherwise clean — resolved claims, hashed evidence, a full
//! scope declaration — so the only BLOCK comes from the basis-required
//! gate, making the scenario a sharp fixture for that one failure mode.

use serde_json::json;

use casegate_audit::AuditLogBuilder;
use casegate_contracts::{
    case::{CaseFile, CaseMetadata, Claim, EvidenceItem, Opinion},
    error::CasegateResult,
};

use crate::pack::ScenarioPack;

const BASE_TS_MS: i64 = 1_761_000_000_000;

pub fn pack() -> CasegateResult<ScenarioPack> {
    let evidence = vec![EvidenceItem {
        id: "ev-ledger-01".to_string(),
        label: "General ledger extract, fiscal 2025".to_string(),
        sha256: Some("44".repeat(32)),
    }];

    let claims = vec![Claim {
        id: "cl-duplicate-entries".to_string(),
        text: "Fourteen vendor invoices appear twice in the ledger under distinct entry ids.".to_string(),
        evidence_refs: vec!["ev-ledger-01".to_string()],
    }];

    // The defect under test: a conclusion with no supporting references.
    let opinion = Opinion {
        id: "op-misstatement".to_string(),
        text: "The duplicated entries materially overstate accounts payable.".to_string(),
        supporting_refs: vec![],
        reasoning: "Duplicate postings inflate the payable balance by the duplicated amounts.".to_string(),
        what_would_change: "Documentation showing the second postings were legitimate reversals.".to_string(),
        ai_assisted: false,
        authored_by_human: true,
    };

    let metadata = CaseMetadata {
        role: Some("forensic accountant".to_string()),
        referral_question: Some("Does the ledger contain duplicated vendor invoices?".to_string()),
        scope: Some("Review limited to the supplied ledger extract.".to_string()),
    };

    let mut b = AuditLogBuilder::new(BASE_TS_MS);
    b.append("case_opened", json!({"case_id": "fa-2026-0042"}))?;
    b.append(
        "evidence_ingested",
        json!({"evidence_id": "ev-ledger-01", "label": "General ledger extract, fiscal 2025", "sha256": "44".repeat(32)}),
    )?;
    b.append(
        "claim_recorded",
        json!({"claim_id": "cl-duplicate-entries", "evidence_refs": ["ev-ledger-01"]}),
    )?;
    b.append(
        "opinion_recorded",
        json!({
            "opinion_id": opinion.id,
            "supporting_refs": [],
            "reasoning": opinion.reasoning,
            "what_would_change": opinion.what_would_change,
            "authored_by_human": true,
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
        name: "missing-basis",
        case: CaseFile {
            case_id: "fa-2026-0042".to_string(),
            metadata: Some(metadata),
            opinions: Some(vec![opinion]),
            claims: Some(claims),
            evidence: Some(evidence),
            limitations: Some(vec![]),
            contradictions: Some(vec![]),
        },
        events: b.into_events(),
    })
}
