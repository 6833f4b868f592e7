//! # casegate-contracts
//!
//! Shared types, reason codes, and error definitions for the CASEGATE
//! gate-report pipeline.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate — only data definitions and error types.

pub mod audit;
pub mod case;
pub mod error;
pub mod finding;
pub mod report;
