//! # casegate-canon
//!
//! The determinism kernel of the CASEGATE pipeline: canonical JSON
//! serialization, SHA-256 hashing over canonical bytes, and content-derived
//! UUIDv5 identifiers.
//!
//! Everything here is pure — no I/O, no clocks, no randomness. Two
//! conformant implementations given semantically equal input (any key
//! order) must emit byte-identical strings, hashes, and ids.

pub mod canonical;
pub mod identity;

pub use canonical::{canonical_sha256, canonical_stringify, canonicalize};
pub use identity::{finding_id, report_id, FINDING_NAMESPACE};
