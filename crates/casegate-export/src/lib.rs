//! # casegate-export
//!
//! The export assembler: builds the hash-sealed canonical gate report and
//! its companion metadata record, and writes the export directory.
//!
//! The assembler writes and never reads back — trusting the written files
//! is the Verifier's job, on the other side of the trust boundary.

pub mod assemble;
pub mod seal;
pub mod writer;

pub use assemble::assemble;
pub use seal::{compute_canonical_hash, verify_canonical_hash};
pub use writer::{write_export, AUDIT_LOG_FILE, CANON_FILE, META_FILE};
