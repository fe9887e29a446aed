//! Engine configuration, loadable from TOML.
//!
//! `EngineConfig::default()` carries the production values; a TOML file can
//! override any subset of them. Every field is matched case-insensitively
//! against uppercased carrier strings, so indicator lists are stored
//! uppercase.

use std::path::Path;

use serde::{Deserialize, Serialize};

use clearbill_contracts::error::{ClearbillError, ClearbillResult};

/// Tunable knobs and indicator lists for one engine instance.
///
/// ```toml
/// agent_id = "clearbill-responsibility"
/// default_coinsurance_pct = 20.0
/// lookback_days = 90
/// medicaid_indicators = ["MCD", "MEDICAID", "HEALTH FIRST MEDICAID"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Logical agent identity used for audit rows and duplicate lookups.
    pub agent_id: String,

    /// Tokens that mark a carrier code or name as Medicaid.
    pub medicaid_indicators: Vec<String>,

    /// Carrier aliases that are financially out of scope by policy:
    /// Medicaid itself plus the regional managed-Medicaid entities. A match
    /// forces memo suppression regardless of computed values.
    pub medicaid_exclusion_aliases: Vec<String>,

    /// Coinsurance percentage substituted when the fallback branch fires
    /// and neither source offered a copay or coinsurance.
    pub default_coinsurance_pct: f64,

    /// Duplicate-suppression window in days.
    pub lookback_days: i64,

    /// Self-pay price for IM ketamine induction.
    pub self_pay_im_ketamine: f64,

    /// Self-pay price for Spravato induction.
    pub self_pay_spravato: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            agent_id: "clearbill-responsibility".to_string(),
            medicaid_indicators: vec![
                "MCD".to_string(),
                "MEDICAID".to_string(),
                "HEALTH FIRST MEDICAID".to_string(),
            ],
            medicaid_exclusion_aliases: vec![
                "MCD".to_string(),
                "MEDICAID".to_string(),
                "COLORADO COMMUNITY HEALTH ALLIANCE".to_string(),
                "CCHA".to_string(),
                "COLORADO ACCESS".to_string(),
            ],
            default_coinsurance_pct: 20.0,
            lookback_days: 90,
            self_pay_im_ketamine: 399.0,
            self_pay_spravato: 949.0,
        }
    }
}

impl EngineConfig {
    /// Parse `s` as TOML configuration.
    ///
    /// Returns `ClearbillError::ConfigError` if the TOML is malformed or a
    /// value fails validation.
    pub fn from_toml_str(s: &str) -> ClearbillResult<Self> {
        let config: EngineConfig = toml::from_str(s).map_err(|e| ClearbillError::ConfigError {
            reason: format!("failed to parse engine config TOML: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read the file at `path` and parse it as TOML configuration.
    pub fn from_file(path: &Path) -> ClearbillResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ClearbillError::ConfigError {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    fn validate(&self) -> ClearbillResult<()> {
        if self.agent_id.trim().is_empty() {
            return Err(ClearbillError::ConfigError {
                reason: "agent_id must not be empty".to_string(),
            });
        }
        if self.lookback_days <= 0 {
            return Err(ClearbillError::ConfigError {
                reason: format!("lookback_days must be positive, got {}", self.lookback_days),
            });
        }
        if !(0.0..=100.0).contains(&self.default_coinsurance_pct) {
            return Err(ClearbillError::ConfigError {
                reason: format!(
                    "default_coinsurance_pct must be within 0–100, got {}",
                    self.default_coinsurance_pct
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.lookback_days, 90);
        assert_eq!(config.default_coinsurance_pct, 20.0);
    }

    #[test]
    fn toml_overrides_merge_onto_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            lookback_days = 30
            default_coinsurance_pct = 25.0
            "#,
        )
        .unwrap();
        assert_eq!(config.lookback_days, 30);
        assert_eq!(config.default_coinsurance_pct, 25.0);
        // Untouched fields keep their defaults.
        assert_eq!(config.self_pay_im_ketamine, 399.0);
        assert!(config.medicaid_indicators.contains(&"MCD".to_string()));
    }

    #[test]
    fn invalid_lookback_is_rejected() {
        let err = EngineConfig::from_toml_str("lookback_days = 0").unwrap_err();
        assert!(err.to_string().contains("lookback_days"));
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let err = EngineConfig::from_toml_str("lookback_days = [whoops").unwrap_err();
        assert!(err.to_string().contains("configuration error"));
    }
}
