//! Audit event types for the append-only hash chain.
//!
//! `AuditEvent` is one entry in the SHA-256 hash chain recorded by the
//! (out-of-scope) case-management producer. Each event commits to the
//! previous event via `prev_hash`; modifying any field invalidates
//! `chain_hash` and every subsequent `prev_hash`, which the chain verifier
//! detects.
//!
//! Timestamps are integer Unix milliseconds. Hashed structures are
//! integer-only by contract — no floats, no formatted date strings — so two
//! independent implementations hash identically.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The `prev_hash` sentinel for the first event in every chain.
///
/// 64 hex zeros — a value that can never be the SHA-256 of real data,
/// making genesis detection unambiguous.
pub const GENESIS_HASH: &str =
    "0000000000000000000000000000000000000000000000000000000000000000";

/// A single entry in the append-only audit chain.
///
/// Invariant: `chain_hash` is the SHA-256 of the canonical JSON of
/// `{seq, timestamp, action, details, prev_hash}`, and entry *n*'s
/// `prev_hash` equals entry *n−1*'s `chain_hash` (`GENESIS_HASH` for
/// entry 0).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Monotonically increasing position in the chain, starting at 0.
    pub seq: u64,

    /// Unix milliseconds. Monotonicity is checked but reported separately
    /// from chain integrity — wall clocks drift, hashes do not.
    pub timestamp: i64,

    /// Event kind, e.g. `ai_content_generated` or `human_review`. Gates
    /// interpret `details` as a tagged payload keyed by this field.
    pub action: String,

    /// Open-ended payload. The envelope stays strongly typed; specific
    /// gates deserialize `details` into typed structs at the point of use.
    pub details: Value,

    /// `chain_hash` of the previous event, or `GENESIS_HASH` for seq 0.
    pub prev_hash: String,

    /// SHA-256 (lowercase hex) over this event's canonical content.
    pub chain_hash: String,
}

// Typed views over `details`, deserialized by gates when an action matches.
// Unknown or malformed payloads are skipped, not fatal — partially
// populated logs are a normal mid-workflow state.

/// Payload of an `ai_content_generated` event.
#[derive(Debug, Clone, Deserialize)]
pub struct AiContentDetails {
    pub content_id: String,
}

/// Payload of a `human_review` event.
#[derive(Debug, Clone, Deserialize)]
pub struct HumanReviewDetails {
    pub content_id: String,
    pub outcome: String,
}

/// Payload of a `contradiction_resolved` event.
#[derive(Debug, Clone, Deserialize)]
pub struct ContradictionResolvedDetails {
    pub contradiction_id: String,
}

/// Payload of a `human_signoff` event (escalation gate).
#[derive(Debug, Clone, Deserialize)]
pub struct SignoffDetails {
    pub object_id: String,
    #[serde(default)]
    pub role: String,
}

/// Payload of an `opinion_recorded` event — fallback source when the case
/// file carries no `opinions` section.
#[derive(Debug, Clone, Deserialize)]
pub struct OpinionRecordedDetails {
    pub opinion_id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub supporting_refs: Vec<String>,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub what_would_change: String,
    #[serde(default)]
    pub ai_assisted: bool,
    #[serde(default)]
    pub authored_by_human: bool,
}

/// Payload of a `limitation_recorded` event — fallback for `limitations`.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitationRecordedDetails {
    pub limitation_id: String,
    #[serde(default)]
    pub description: String,
    pub status: Option<String>,
    pub impact: Option<String>,
    pub discloses_contradiction: Option<String>,
}

/// Payload of a `claim_recorded` event — fallback for `claims`.
#[derive(Debug, Clone, Deserialize)]
pub struct ClaimRecordedDetails {
    pub claim_id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub evidence_refs: Vec<String>,
}

/// Payload of a `contradiction_detected` event — fallback for
/// `contradictions`.
#[derive(Debug, Clone, Deserialize)]
pub struct ContradictionDetectedDetails {
    pub contradiction_id: String,
    #[serde(default)]
    pub claim_a: String,
    #[serde(default)]
    pub claim_b: String,
}

/// Payload of an `evidence_ingested` event — fallback for `evidence`.
#[derive(Debug, Clone, Deserialize)]
pub struct EvidenceIngestedDetails {
    pub evidence_id: String,
    #[serde(default)]
    pub label: String,
    pub sha256: Option<String>,
}

/// Payload of a `scope_declared` event — fallback for `metadata`.
#[derive(Debug, Clone, Deserialize)]
pub struct ScopeDeclaredDetails {
    pub role: Option<String>,
    pub referral_question: Option<String>,
    pub scope: Option<String>,
}
