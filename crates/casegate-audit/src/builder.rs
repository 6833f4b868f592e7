//! Fixture-side audit log builder.
//!
//! Appends events with correctly computed chain hashes and synthetic,
//! deterministic timestamps. The production audit-log producer lives in the
//! case-management collaborator; this builder exists for scenario packs and
//! tests, which need well-formed chains without wall-clock noise.

use serde_json::Value;

use casegate_contracts::{
    audit::{AuditEvent, GENESIS_HASH},
    error::CasegateResult,
};

use crate::chain::chain_hash;

/// An append-only builder over a growing hash chain.
///
/// Timestamps advance by a fixed step per event from the supplied base, so
/// two builds over the same inputs are byte-identical.
pub struct AuditLogBuilder {
    events: Vec<AuditEvent>,
    next_seq: u64,
    next_timestamp: i64,
    step_ms: i64,
    last_hash: String,
}

impl AuditLogBuilder {
    /// Create a builder whose first event carries `base_timestamp_ms`.
    pub fn new(base_timestamp_ms: i64) -> Self {
        Self {
            events: Vec::new(),
            next_seq: 0,
            next_timestamp: base_timestamp_ms,
            step_ms: 1_000,
            last_hash: GENESIS_HASH.to_string(),
        }
    }

    /// Override the timestamp of the next appended event. Used by tests to
    /// fabricate clock regressions.
    pub fn set_next_timestamp(&mut self, timestamp_ms: i64) {
        self.next_timestamp = timestamp_ms;
    }

    /// Append one event, computing its `chain_hash` from the running state.
    pub fn append(&mut self, action: &str, details: Value) -> CasegateResult<()> {
        let seq = self.next_seq;
        let timestamp = self.next_timestamp;
        let prev_hash = self.last_hash.clone();

        let hash = chain_hash(seq, timestamp, action, &details, &prev_hash)?;

        self.events.push(AuditEvent {
            seq,
            timestamp,
            action: action.to_string(),
            details,
            prev_hash,
            chain_hash: hash.clone(),
        });

        self.next_seq += 1;
        self.next_timestamp = timestamp + self.step_ms;
        self.last_hash = hash;

        Ok(())
    }

    /// The current chain head (`GENESIS_HASH` before any append).
    pub fn head_hash(&self) -> &str {
        &self.last_hash
    }

    pub fn events(&self) -> &[AuditEvent] {
        &self.events
    }

    /// Consume the builder, yielding the chain in append order.
    pub fn into_events(self) -> Vec<AuditEvent> {
        self.events
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::AuditLogBuilder;
    use crate::chain::verify_chain;
    use casegate_contracts::audit::GENESIS_HASH;

    #[test]
    fn built_chains_always_verify() {
        let mut builder = AuditLogBuilder::new(1_700_000_000_000);
        for i in 0..10 {
            builder
                .append("evidence_ingested", json!({"evidence_id": format!("ev-{i}")}))
                .unwrap();
        }
        let events = builder.into_events();
        assert!(verify_chain(&events).unwrap().valid);
    }

    #[test]
    fn first_event_links_to_genesis() {
        let mut builder = AuditLogBuilder::new(0);
        builder.append("case_opened", json!({})).unwrap();
        assert_eq!(builder.events()[0].prev_hash, GENESIS_HASH);
        assert_eq!(builder.events()[0].seq, 0);
    }

    /// Two builds over the same inputs must be byte-identical.
    #[test]
    fn builds_are_deterministic() {
        let build = || {
            let mut b = AuditLogBuilder::new(42_000);
            b.append("a", json!({"k": 1})).unwrap();
            b.append("b", json!({"k": 2})).unwrap();
            b.into_events()
        };
        let one = build();
        let two = build();
        assert_eq!(
            serde_json::to_string(&one).unwrap(),
            serde_json::to_string(&two).unwrap()
        );
    }
}
