//! Price rules: floors and target crossings

use super::PriceRules;

/// Applies price floors and detects target crossings
pub struct PriceAnalyzer {
    rules: PriceRules,
}

impl PriceAnalyzer {
    pub fn new(rules: PriceRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> PriceRules {
        self.rules
    }

    /// Price after a random-walk step, never below the tick floor
    pub fn apply_delta(&self, price: i64, delta: i64) -> i64 {
        price.saturating_add(delta).max(self.rules.tick_floor)
    }

    /// Price after a manual drop, never below the manual floor
    pub fn apply_drop(&self, price: i64, amount: i64) -> i64 {
        price.saturating_sub(amount).max(self.rules.manual_drop_floor)
    }

    /// True when the price moves down and lands at or below the target.
    ///
    /// Holding or rising while under the target does not re-trigger.
    pub fn crossed_target(&self, old_price: i64, new_price: i64, target: i64) -> bool {
        target > 0 && new_price <= target && new_price < old_price
    }
}

impl Default for PriceAnalyzer {
    fn default() -> Self {
        Self::new(PriceRules::default())
    }
}
