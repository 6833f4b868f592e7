//! Named scenario catalog.
//!
//! Each scenario module builds one `ScenarioPack` from hardcoded fictional
//! data with a fixed base timestamp, so the pack — and everything derived
//! from it — is reproducible.

use casegate_contracts::error::{CasegateError, CasegateResult};

use crate::pack::ScenarioPack;

pub mod contradiction;
pub mod missing_basis;
pub mod pass;
pub mod scale;

/// Every scenario name accepted by [`scenario`].
pub const NAMES: [&str; 4] = ["pass", "missing-basis", "contradiction", "scale"];

/// Build the named scenario pack.
pub fn scenario(name: &str) -> CasegateResult<ScenarioPack> {
    match name {
        "pass" => pass::pack(),
        "missing-basis" => missing_basis::pack(),
        "contradiction" => contradiction::pack(),
        "scale" => scale::pack(),
        other => Err(CasegateError::InputMalformed {
            reason: format!(
                "unknown scenario '{}', expected one of: {}",
                other,
                NAMES.join(", ")
            ),
        }),
    }
}
