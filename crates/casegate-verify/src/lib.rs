//! # casegate-verify
//!
//! The independent export verifier.
//!
//! Core property: nothing a producer claims is trusted — the verifier
//! recomputes every hash, id, count, and ordering from the export
//! directory's contents, in one synchronous pass, and runs *every* check
//! even after an earlier one fails. It shares no state with the assembler
//! and is stateless and re-entrant: verifying the same directory twice
//! yields the same report.

pub mod config;
pub mod diff;
pub mod engine;
pub mod schema;

pub use config::VerifyConfig;
pub use diff::{diff_reports, GoldenDiff};
pub use engine::{verify_export, Check, CheckStatus, VerifyOptions, VerifyReport, VerifyResult};
