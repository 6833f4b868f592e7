//! Canonical case-data model.
//!
//! The case file is owned by the external case-management collaborator; the
//! pipeline reads specific substructures and never mutates it. Every
//! substructure is `Option` so that a section *absent* from a partial
//! mid-workflow snapshot (gates then fall back to the audit log) is
//! distinguishable from a section that is present but empty (gates trust it
//! as-is).

use serde::{Deserialize, Serialize};

/// Top-level case document consumed by the gate engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseFile {
    /// Collaborator-assigned case identifier, carried into the report.
    pub case_id: String,

    /// Role, referral question, and scope declaration.
    pub metadata: Option<CaseMetadata>,

    /// Opinion-like objects requiring a defensible basis.
    pub opinions: Option<Vec<Opinion>>,

    /// Claims tying narrative statements to evidence references.
    pub claims: Option<Vec<Claim>>,

    /// The evidence inventory claims must resolve against.
    pub evidence: Option<Vec<EvidenceItem>>,

    /// Registered limitations; each needs a status and an impact statement.
    pub limitations: Option<Vec<Limitation>>,

    /// Detected pairwise contradictions between claims.
    pub contradictions: Option<Vec<Contradiction>>,
}

/// Top-level declarations the scope-declaration gate checks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseMetadata {
    pub role: Option<String>,
    pub referral_question: Option<String>,
    pub scope: Option<String>,
}

/// An opinion-like object. The basis-required gate demands at least one
/// supporting reference, a reasoning narrative, and revision criteria
/// ("what would change this").
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Opinion {
    pub id: String,
    pub text: String,
    pub supporting_refs: Vec<String>,
    pub reasoning: String,
    pub what_would_change: String,
    /// True when any part of the text originated from the AI subsystem.
    pub ai_assisted: bool,
    /// True when a human wrote the conclusion directly.
    pub authored_by_human: bool,
}

/// A claim with evidence references that must resolve in the inventory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Claim {
    pub id: String,
    pub text: String,
    pub evidence_refs: Vec<String>,
}

/// One entry in the evidence inventory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EvidenceItem {
    pub id: String,
    pub label: String,
    /// Content hash of the underlying asset; its absence is a WARN.
    pub sha256: Option<String>,
}

/// A registered limitation. The open-items gate blocks on a missing status
/// or impact statement; a limitation may also disclose an unresolved
/// contradiction by id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Limitation {
    pub id: String,
    pub description: String,
    pub status: Option<String>,
    pub impact: Option<String>,
    /// Id of a contradiction this limitation discloses as unresolved.
    pub discloses_contradiction: Option<String>,
}

/// A detected pairwise contradiction between two claims.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Contradiction {
    pub id: String,
    pub claim_a: String,
    pub claim_b: String,
    pub description: String,
}
