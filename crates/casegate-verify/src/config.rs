//! Verifier configuration.
//!
//! Soft checks (e.g. a missing optional audit log) downgrade confidence
//! without flipping PASS — unless the operator configures otherwise:
//!
//! ```toml
//! [checks]
//! soft_checks_fatal = true
//! ```

use std::path::Path;

use serde::Deserialize;

use casegate_contracts::error::{CasegateError, CasegateResult};

/// Top-level verifier configuration, deserialized from TOML.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VerifyConfig {
    pub checks: CheckPolicy,
}

/// Policy for folding check statuses into the overall result.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CheckPolicy {
    /// When true, any soft-status check forces overall FAIL.
    pub soft_checks_fatal: bool,
}

impl VerifyConfig {
    /// Parse `s` as TOML configuration.
    pub fn from_toml_str(s: &str) -> CasegateResult<Self> {
        toml::from_str(s).map_err(|e| CasegateError::ContractViolation {
            reason: format!("failed to parse verifier config TOML: {e}"),
        })
    }

    /// Read and parse the TOML file at `path`.
    pub fn from_file(path: &Path) -> CasegateResult<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| CasegateError::ExecutionError {
                reason: format!("failed to read verifier config '{}': {}", path.display(), e),
            })?;
        Self::from_toml_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::VerifyConfig;

    #[test]
    fn default_keeps_soft_checks_soft() {
        let config = VerifyConfig::default();
        assert!(!config.checks.soft_checks_fatal);
    }

    #[test]
    fn toml_enables_fatal_soft_checks() {
        let config = VerifyConfig::from_toml_str("[checks]\nsoft_checks_fatal = true\n").unwrap();
        assert!(config.checks.soft_checks_fatal);
    }

    #[test]
    fn empty_toml_is_the_default_config() {
        let config = VerifyConfig::from_toml_str("").unwrap();
        assert!(!config.checks.soft_checks_fatal);
    }

    #[test]
    fn malformed_toml_is_a_contract_violation() {
        assert!(VerifyConfig::from_toml_str("checks = ???").is_err());
    }
}
