//! # casegate-scenarios
//!
//! Reference scenario packs for the gate pipeline.
//!
//! Each scenario is a deterministic `(case file, audit chain)` pair built
//! with fixed timestamps, so two builds — and two exports — of the same
//! scenario are byte-identical:
//!
//! 1. **pass** — a fully articulated case that clears every gate.
//! 2. **missing-basis** — an opinion with no supporting anchors (BLOCK).
//! 3. **contradiction** — a detected contradiction nobody resolved or
//!    disclosed (BLOCK).
//! 4. **scale** — a wide case with a long audit chain, for exercising the
//!    pipeline beyond toy sizes.
//!
//! All data is hardcoded and fictional.

pub mod pack;
pub mod scenarios;

pub use pack::{produce_export, ScenarioPack};
pub use scenarios::{scenario, NAMES};
