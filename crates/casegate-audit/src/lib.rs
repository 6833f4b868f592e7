//! # casegate-audit
//!
//! The append-only, SHA-256 hash-chained audit log: event hashing, chain
//! verification, NDJSON persistence, and a fixture-side builder.
//!
//! The chain makes retroactive edits detectable: each event's `chain_hash`
//! commits to its own canonical content *and* (via `prev_hash`) to every
//! event before it. The verifier here recomputes the whole walk and never
//! trusts stored hashes.

pub mod builder;
pub mod chain;
pub mod ndjson;

pub use builder::AuditLogBuilder;
pub use chain::{chain_hash, head_hash, verify_chain, ChainBreak, ChainVerification};
pub use ndjson::{read_ndjson, write_ndjson};
