//! Unified read view over case data and audit history.
//!
//! Precedence rule (explicit, not an implementation accident): a gate
//! consults a case-file substructure whenever it is present (`Some`), even
//! if empty; reconstruction from audit events happens only when the
//! substructure is absent entirely. When reconstructing, the *last* event
//! for a given object id wins — later events supersede earlier ones.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use casegate_contracts::{
    audit::{
        AuditEvent, ClaimRecordedDetails, ContradictionDetectedDetails,
        EvidenceIngestedDetails, LimitationRecordedDetails, OpinionRecordedDetails,
        ScopeDeclaredDetails,
    },
    case::{CaseFile, CaseMetadata, Claim, Contradiction, EvidenceItem, Limitation, Opinion},
};

/// Immutable view a gate evaluates against.
pub struct CaseView<'a> {
    pub case: &'a CaseFile,
    pub audit: &'a [AuditEvent],
}

impl<'a> CaseView<'a> {
    pub fn new(case: &'a CaseFile, audit: &'a [AuditEvent]) -> Self {
        Self { case, audit }
    }

    pub fn case_id(&self) -> &str {
        &self.case.case_id
    }

    /// Parse the details of every event with the given action into `T`,
    /// in log order. Malformed payloads are skipped — a bad producer line
    /// must not abort a gate.
    pub fn typed_events<T: DeserializeOwned>(&self, action: &str) -> Vec<T> {
        self.audit
            .iter()
            .filter(|e| e.action == action)
            .filter_map(|e| match serde_json::from_value::<T>(e.details.clone()) {
                Ok(t) => Some(t),
                Err(err) => {
                    debug!(seq = e.seq, action = %e.action, %err, "skipping unparseable event payload");
                    None
                }
            })
            .collect()
    }

    /// Raw details of every event with the given action, in log order.
    pub fn raw_events(&self, action: &str) -> Vec<&Value> {
        self.audit
            .iter()
            .filter(|e| e.action == action)
            .map(|e| &e.details)
            .collect()
    }

    pub fn opinions(&self) -> Vec<Opinion> {
        if let Some(opinions) = &self.case.opinions {
            return opinions.clone();
        }
        last_wins(
            self.typed_events::<OpinionRecordedDetails>("opinion_recorded"),
            |d| {
                (
                    d.opinion_id.clone(),
                    Opinion {
                        id: d.opinion_id,
                        text: d.text,
                        supporting_refs: d.supporting_refs,
                        reasoning: d.reasoning,
                        what_would_change: d.what_would_change,
                        ai_assisted: d.ai_assisted,
                        authored_by_human: d.authored_by_human,
                    },
                )
            },
        )
    }

    pub fn claims(&self) -> Vec<Claim> {
        if let Some(claims) = &self.case.claims {
            return claims.clone();
        }
        last_wins(self.typed_events::<ClaimRecordedDetails>("claim_recorded"), |d| {
            (
                d.claim_id.clone(),
                Claim {
                    id: d.claim_id,
                    text: d.text,
                    evidence_refs: d.evidence_refs,
                },
            )
        })
    }

    pub fn evidence(&self) -> Vec<EvidenceItem> {
        if let Some(evidence) = &self.case.evidence {
            return evidence.clone();
        }
        last_wins(
            self.typed_events::<EvidenceIngestedDetails>("evidence_ingested"),
            |d| {
                (
                    d.evidence_id.clone(),
                    EvidenceItem {
                        id: d.evidence_id,
                        label: d.label,
                        sha256: d.sha256,
                    },
                )
            },
        )
    }

    pub fn limitations(&self) -> Vec<Limitation> {
        if let Some(limitations) = &self.case.limitations {
            return limitations.clone();
        }
        last_wins(
            self.typed_events::<LimitationRecordedDetails>("limitation_recorded"),
            |d| {
                (
                    d.limitation_id.clone(),
                    Limitation {
                        id: d.limitation_id,
                        description: d.description,
                        status: d.status,
                        impact: d.impact,
                        discloses_contradiction: d.discloses_contradiction,
                    },
                )
            },
        )
    }

    pub fn contradictions(&self) -> Vec<Contradiction> {
        if let Some(contradictions) = &self.case.contradictions {
            return contradictions.clone();
        }
        last_wins(
            self.typed_events::<ContradictionDetectedDetails>("contradiction_detected"),
            |d| {
                (
                    d.contradiction_id.clone(),
                    Contradiction {
                        id: d.contradiction_id,
                        claim_a: d.claim_a,
                        claim_b: d.claim_b,
                        description: String::new(),
                    },
                )
            },
        )
    }

    pub fn metadata(&self) -> Option<CaseMetadata> {
        if let Some(metadata) = &self.case.metadata {
            return Some(metadata.clone());
        }
        self.typed_events::<ScopeDeclaredDetails>("scope_declared")
            .into_iter()
            .last()
            .map(|d| CaseMetadata {
                role: d.role,
                referral_question: d.referral_question,
                scope: d.scope,
            })
    }
}

/// Collapse reconstructed objects so the last event per id wins, yielding
/// a deterministic id-sorted order.
fn last_wins<D, T>(details: Vec<D>, to_entry: impl Fn(D) -> (String, T)) -> Vec<T> {
    let mut by_id: BTreeMap<String, T> = BTreeMap::new();
    for d in details {
        let (id, t) = to_entry(d);
        by_id.insert(id, t);
    }
    by_id.into_values().collect()
}
