//! The gate catalog.
//!
//! Representative and pluggable: adding a gate means adding a module here
//! and registering it in `engine::registry()`. Each gate is a unit struct
//! implementing `Gate` — all inputs arrive through the `CaseView`.

pub mod basis;
pub mod conflict;
pub mod escalation;
pub mod open_items;
pub mod oversight;
pub mod reference;
pub mod scope;
