//! Hash-chain primitives: event hashing and full-walk chain verification.
//!
//! Hash rule: `chain_hash = SHA-256(canonical({seq, timestamp, action,
//! details, prev_hash}))` — every field that contributes is listed
//! explicitly in the preimage object so nothing is accidentally omitted,
//! and the canonicalizer guarantees the byte layout.
//!
//! Unlike a first-mismatch-wins check, `verify_chain` walks the whole log
//! and surfaces *all* breaks: a consumer auditing a tampered log needs the
//! complete damage report, not the first symptom.

use serde::Serialize;
use serde_json::{json, Value};
use tracing::warn;

use casegate_canon::canonical_sha256;
use casegate_contracts::{
    audit::{AuditEvent, GENESIS_HASH},
    error::CasegateResult,
};

/// Compute the chain hash for one event's fields plus the running
/// `prev_hash`.
///
/// Returns a lowercase 64-character hex string. Fails only if `details`
/// violates the integer-only rule.
pub fn chain_hash(
    seq: u64,
    timestamp: i64,
    action: &str,
    details: &Value,
    prev_hash: &str,
) -> CasegateResult<String> {
    canonical_sha256(&json!({
        "seq": seq,
        "timestamp": timestamp,
        "action": action,
        "details": details,
        "prev_hash": prev_hash,
    }))
}

/// Which invariant a [`ChainBreak`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakKind {
    /// `prev_hash` does not link to the preceding event's `chain_hash`.
    PrevHashLink,
    /// The stored `chain_hash` does not match the recomputed value —
    /// the event's own content was altered.
    EventContent,
}

/// One detected break in the chain.
#[derive(Debug, Clone, Serialize)]
pub struct ChainBreak {
    pub seq: u64,
    pub kind: BreakKind,
    pub expected_hash: String,
    pub actual_hash: String,
}

/// The result of a full chain walk.
#[derive(Debug, Clone, Serialize)]
pub struct ChainVerification {
    /// True iff no breaks and no sequence violations were found.
    pub valid: bool,

    /// The stored `chain_hash` of the last event, or `GENESIS_HASH` for an
    /// empty log.
    pub final_hash: String,

    /// Every break found, in walk order.
    pub breaks: Vec<ChainBreak>,

    /// Seqs at which the sequence number failed to increase strictly.
    pub seq_violations: Vec<u64>,

    /// Seqs at which the timestamp regressed. Reported separately and
    /// deliberately excluded from `valid` — wall clocks drift, hashes
    /// do not.
    pub timestamp_regressions: Vec<u64>,
}

/// Recompute and verify the entire chain from genesis.
///
/// The walk continues past breaks. After an `EventContent` mismatch the
/// expected prev-hash resynchronizes on the *stored* `chain_hash`, so a
/// single tampered event yields exactly one break at its own seq instead
/// of cascading through the rest of the log.
///
/// An empty chain is valid with `final_hash = GENESIS_HASH`.
pub fn verify_chain(events: &[AuditEvent]) -> CasegateResult<ChainVerification> {
    let mut breaks = Vec::new();
    let mut seq_violations = Vec::new();
    let mut timestamp_regressions = Vec::new();

    let mut expected_prev = GENESIS_HASH.to_string();
    let mut last_seq: Option<u64> = None;
    let mut last_timestamp: Option<i64> = None;

    for event in events {
        // Strictly increasing sequence numbers.
        if let Some(prev_seq) = last_seq {
            if event.seq <= prev_seq {
                seq_violations.push(event.seq);
            }
        }
        last_seq = Some(event.seq);

        // Non-decreasing timestamps (weaker, separately reported).
        if let Some(prev_ts) = last_timestamp {
            if event.timestamp < prev_ts {
                timestamp_regressions.push(event.seq);
            }
        }
        last_timestamp = Some(event.timestamp);

        // Rule 1: prev-hash linkage.
        if event.prev_hash != expected_prev {
            breaks.push(ChainBreak {
                seq: event.seq,
                kind: BreakKind::PrevHashLink,
                expected_hash: expected_prev.clone(),
                actual_hash: event.prev_hash.clone(),
            });
        }

        // Rule 2: recompute the event's own hash from its fields.
        let recomputed = chain_hash(
            event.seq,
            event.timestamp,
            &event.action,
            &event.details,
            &event.prev_hash,
        )?;
        if event.chain_hash != recomputed {
            breaks.push(ChainBreak {
                seq: event.seq,
                kind: BreakKind::EventContent,
                expected_hash: recomputed,
                actual_hash: event.chain_hash.clone(),
            });
        }

        // Resynchronize on the stored hash so later events are judged on
        // their own linkage.
        expected_prev = event.chain_hash.clone();
    }

    let final_hash = events
        .last()
        .map(|e| e.chain_hash.clone())
        .unwrap_or_else(|| GENESIS_HASH.to_string());

    let valid = breaks.is_empty() && seq_violations.is_empty();
    if !valid {
        warn!(
            break_count = breaks.len(),
            seq_violations = seq_violations.len(),
            "audit chain verification failed"
        );
    }

    Ok(ChainVerification {
        valid,
        final_hash,
        breaks,
        seq_violations,
        timestamp_regressions,
    })
}

/// The chain head: the stored `chain_hash` of the last event, or
/// `GENESIS_HASH` for an empty log.
pub fn head_hash(events: &[AuditEvent]) -> String {
    events
        .last()
        .map(|e| e.chain_hash.clone())
        .unwrap_or_else(|| GENESIS_HASH.to_string())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{verify_chain, BreakKind};
    use crate::builder::AuditLogBuilder;
    use casegate_contracts::audit::GENESIS_HASH;

    fn sample_chain(n: u64) -> Vec<casegate_contracts::audit::AuditEvent> {
        let mut builder = AuditLogBuilder::new(1_700_000_000_000);
        for i in 0..n {
            builder
                .append("case_touched", json!({"step": i}))
                .unwrap();
        }
        builder.into_events()
    }

    #[test]
    fn empty_chain_is_valid_with_genesis_head() {
        let v = verify_chain(&[]).unwrap();
        assert!(v.valid);
        assert_eq!(v.final_hash, GENESIS_HASH);
        assert!(v.breaks.is_empty());
    }

    #[test]
    fn well_formed_chain_verifies() {
        let events = sample_chain(5);
        let v = verify_chain(&events).unwrap();
        assert!(v.valid, "breaks: {:?}", v.breaks);
        assert_eq!(v.final_hash, events.last().unwrap().chain_hash);
        assert!(v.timestamp_regressions.is_empty());
    }

    /// Flipping one byte of an event's details without recomputing its
    /// chain_hash must produce a break at exactly that seq.
    #[test]
    fn tampered_details_break_at_exact_seq() {
        let mut events = sample_chain(6);
        events[3].details = json!({"step": 999});

        let v = verify_chain(&events).unwrap();
        assert!(!v.valid);
        assert_eq!(v.breaks.len(), 1, "breaks: {:?}", v.breaks);
        assert_eq!(v.breaks[0].seq, 3);
        assert_eq!(v.breaks[0].kind, BreakKind::EventContent);
    }

    /// Two independently tampered events surface as two breaks — the walk
    /// does not stop at the first.
    #[test]
    fn all_breaks_are_surfaced() {
        let mut events = sample_chain(6);
        events[1].details = json!({"step": -1});
        events[4].details = json!({"step": -2});

        let v = verify_chain(&events).unwrap();
        assert_eq!(v.breaks.len(), 2);
        let seqs: Vec<u64> = v.breaks.iter().map(|b| b.seq).collect();
        assert_eq!(seqs, vec![1, 4]);
    }

    /// Relinking prev_hash without recomputing downstream hashes is a
    /// linkage break.
    #[test]
    fn broken_linkage_is_detected() {
        let mut events = sample_chain(4);
        events[2].prev_hash = GENESIS_HASH.to_string();

        let v = verify_chain(&events).unwrap();
        assert!(!v.valid);
        // Linkage broke at seq 2, and seq 2's own hash no longer matches its
        // (altered) prev_hash field.
        assert!(v.breaks.iter().any(|b| b.seq == 2 && b.kind == BreakKind::PrevHashLink));
    }

    #[test]
    fn non_monotonic_seq_is_a_hard_violation() {
        let mut events = sample_chain(3);
        events[2].seq = 1;

        let v = verify_chain(&events).unwrap();
        assert!(!v.valid);
        assert_eq!(v.seq_violations, vec![1]);
    }

    /// A timestamp regression is reported but does not invalidate the chain.
    #[test]
    fn timestamp_regression_is_soft() {
        let mut builder = AuditLogBuilder::new(1_700_000_000_000);
        builder.append("a", json!({})).unwrap();
        builder.set_next_timestamp(1_600_000_000_000);
        builder.append("b", json!({})).unwrap();

        let events = builder.into_events();
        let v = verify_chain(&events).unwrap();
        assert!(v.valid, "timestamp regression must not break validity");
        assert_eq!(v.timestamp_regressions, vec![1]);
    }
}
