//! Scenario: a detected contradiction nobody resolved or disclosed.
//!
//! Two claims about the same time interval conflict; the detection was
//! recorded in the audit chain but there is no `contradiction_resolved`
//! event and no limitation disclosing it. The conflict-resolution gate
//! blocks the export.

use serde_json::json;

use casegate_audit::AuditLogBuilder;
use casegate_contracts::{
    case::{CaseFile, CaseMetadata, Claim, Contradiction, EvidenceItem},
    error::CasegateResult,
};

use crate::pack::ScenarioPack;

const BASE_TS_MS: i64 = 1_762_000_000_000;

pub fn pack() -> CasegateResult<ScenarioPack> {
    let evidence = vec![
        EvidenceItem {
            id: "ev-badge-01".to_string(),
            label: "Building badge-in records".to_string(),
            sha256: Some("55".repeat(32)),
        },
        EvidenceItem {
            id: "ev-vpn-02".to_string(),
            label: "VPN session logs".to_string(),
            sha256: Some("66".repeat(32)),
        },
    ];

    let claims = vec![
        Claim {
            id: "cl-onsite".to_string(),
            text: "The subject was on site between 14:00 and 16:00.".to_string(),
            evidence_refs: vec!["ev-badge-01".to_string()],
        },
        Claim {
            id: "cl-remote".to_string(),
            text: "The subject held an active remote VPN session between 14:10 and 15:40.".to_string(),
            evidence_refs: vec!["ev-vpn-02".to_string()],
        },
    ];

    let contradiction = Contradiction {
        id: "con-location".to_string(),
        claim_a: "cl-onsite".to_string(),
        claim_b: "cl-remote".to_string(),
        description: "On-site presence and a remote session are asserted for the same interval.".to_string(),
    };

    let metadata = CaseMetadata {
        role: Some("digital forensics examiner".to_string()),
        referral_question: Some("Where was the subject during the 14:00-16:00 window?".to_string()),
        scope: Some("Badge and VPN records only; no device imaging.".to_string()),
    };

    let mut b = AuditLogBuilder::new(BASE_TS_MS);
    b.append("case_opened", json!({"case_id": "df-2026-0077"}))?;
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
    b.append(
        "contradiction_detected",
        json!({
            "contradiction_id": contradiction.id,
            "claim_a": contradiction.claim_a,
            "claim_b": contradiction.claim_b,
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
        name: "contradiction",
        case: CaseFile {
            case_id: "df-2026-0077".to_string(),
            metadata: Some(metadata),
            opinions: Some(vec![]),
            claims: Some(claims),
            evidence: Some(evidence),
            limitations: Some(vec![]),
            contradictions: Some(vec![contradiction]),
        },
        events: b.into_events(),
    })
}
