use std::path::Path;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::common::{error::AppError, money::Money};

// one year
const MAX_EDIT_WINDOW_SECS: i64 = 365 * 24 * 60 * 60;

/// One bonus step: deposits of at least `threshold` earn `bonus`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusTier {
    pub threshold: Money,
    pub bonus: Money,
}

/// Tunables of the wallet. Every field has a default so a config file only
/// needs the keys it overrides.
///
/// ```
/// use wallet_ledger::common::config::WalletConfig;
///
/// let cfg = WalletConfig::from_json_str(r#"{ "edit_window_secs": 60 }"#).unwrap();
/// assert_eq!(cfg.edit_window().num_seconds(), 60);
/// assert_eq!(cfg.bonus_tiers.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    pub edit_window_secs: i64,
    pub bonus_tiers: Vec<BonusTier>,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            edit_window_secs: 5 * 60,
            bonus_tiers: vec![
                BonusTier {
                    threshold: Money::units(1000),
                    bonus: Money::units(50),
                },
                BonusTier {
                    threshold: Money::units(500),
                    bonus: Money::units(20),
                },
                BonusTier {
                    threshold: Money::units(100),
                    bonus: Money::units(5),
                },
            ],
        }
    }
}

impl WalletConfig {
    pub fn edit_window(&self) -> Duration {
        Duration::seconds(self.edit_window_secs)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, AppError> {
        let cfg: WalletConfig =
            serde_json::from_str(raw).map_err(|e| AppError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    fn validate(&self) -> Result<(), AppError> {
        if !(0..=MAX_EDIT_WINDOW_SECS).contains(&self.edit_window_secs) {
            return Err(AppError::Config(format!(
                "edit_window_secs must be between 0 and {MAX_EDIT_WINDOW_SECS}"
            )));
        }
        if let Some(tier) = self
            .bonus_tiers
            .iter()
            .find(|t| !t.threshold.is_positive() || t.bonus.is_negative())
        {
            return Err(AppError::Config(format!(
                "invalid bonus tier: threshold {} bonus {}",
                tier.threshold, tier.bonus
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_builtin_policy() {
        let cfg = WalletConfig::default();
        assert_eq!(cfg.edit_window(), Duration::minutes(5));
        assert_eq!(cfg.bonus_tiers[0].threshold, Money::units(1000));
        assert_eq!(cfg.bonus_tiers[2].bonus, Money::units(5));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let cfg = WalletConfig::from_json_str(
            r#"{ "bonus_tiers": [ { "threshold": 10, "bonus": "1.5" } ] }"#,
        )
        .unwrap();
        assert_eq!(cfg.edit_window_secs, 300);
        assert_eq!(cfg.bonus_tiers.len(), 1);
        assert_eq!(cfg.bonus_tiers[0].bonus, Money::new(15_000));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            WalletConfig::from_json_str(r#"{ "edit_window_secs": -1 }"#),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            WalletConfig::from_json_str(r#"{ "bonus_tiers": [ { "threshold": 0, "bonus": 1 } ] }"#),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            WalletConfig::from_json_str("not json"),
            Err(AppError::Config(_))
        ));
    }
}
