//! # casegate-gates
//!
//! The gate engine: a static, ordered catalog of pure rule evaluators over
//! case data plus audit history.
//!
//! Gates share no mutable state, take immutable inputs, and may run in any
//! order or in parallel — results are merged only after all complete, and
//! the deterministic finding sort happens downstream in the assembler, so
//! iteration order can never leak into output bytes.
//!
//! A gate whose expected substructure is absent from the case file does not
//! fail: it falls back to reconstructing equivalent objects from typed
//! audit-event payloads (see [`fallback`]). Partially populated snapshots
//! are a normal mid-workflow state.

pub mod engine;
pub mod fallback;
pub mod gates;

pub use engine::{evaluate, registry, EngineOutput, Gate, GateEvaluation};
pub use fallback::CaseView;
