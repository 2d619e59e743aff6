use crate::common::{config::BonusTier, money::Money};

/// Tiered deposit bonus. The highest tier whose threshold the amount reaches
/// wins; below every threshold the bonus is zero.
#[derive(Debug, Clone)]
pub struct BonusPolicy {
    // sorted by threshold, highest first
    tiers: Vec<BonusTier>,
}

impl BonusPolicy {
    pub fn new(mut tiers: Vec<BonusTier>) -> Self {
        tiers.sort_by(|a, b| b.threshold.cmp(&a.threshold));
        Self { tiers }
    }

    pub fn compute_bonus(&self, amount: Money) -> Money {
        self.tiers
            .iter()
            .find(|tier| amount >= tier.threshold)
            .map(|tier| tier.bonus)
            .unwrap_or_else(Money::zero)
    }
}

impl Default for BonusPolicy {
    fn default() -> Self {
        Self::new(crate::common::config::WalletConfig::default().bonus_tiers)
    }
}
