//! Budget planner: tiered trip suggestions for a price range

use serde::{Deserialize, Serialize};
use std::fmt;
use crate::shared::errors::InputError;

pub const MIN_BUDGET: u32 = 10_000;
pub const MAX_BUDGET: u32 = 200_000;
/// Price ranges below this get the rail/road suggestions
pub const PREMIUM_THRESHOLD: u32 = 50_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetTier {
    Budget,
    Medium,
    Luxury,
}

impl fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BudgetTier::Budget => "Budget",
            BudgetTier::Medium => "Medium",
            BudgetTier::Luxury => "Luxury",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetSuggestion {
    pub tier: BudgetTier,
    pub description: String,
    pub price: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetPlan {
    pub budget: u32,
    pub price_range: u32,
    pub destination: Option<String>,
    pub suggestions: Vec<BudgetSuggestion>,
}

pub fn validate_budget(value: u32) -> Result<u32, InputError> {
    if (MIN_BUDGET..=MAX_BUDGET).contains(&value) {
        Ok(value)
    } else {
        Err(InputError::BudgetOutOfRange(value, MIN_BUDGET, MAX_BUDGET))
    }
}

pub fn suggestions(price_range: u32) -> Vec<BudgetSuggestion> {
    let tiers: [(BudgetTier, &str, i64); 3] = if price_range < PREMIUM_THRESHOLD {
        [
            (BudgetTier::Budget, "Travel by train or car. Basic accommodation.", 30_000),
            (BudgetTier::Medium, "Better hotels, includes some paid activities.", 45_000),
            (BudgetTier::Luxury, "Flights + premium hotel stay.", 60_000),
        ]
    } else {
        [
            (BudgetTier::Budget, "Cheaper flights + basic hotels.", 60_000),
            (BudgetTier::Medium, "Standard flights + 3-star hotel with pool.", 90_000),
            (BudgetTier::Luxury, "Business class + 5-star luxury resort.", 150_000),
        ]
    };

    tiers
        .into_iter()
        .map(|(tier, description, price)| BudgetSuggestion {
            tier,
            description: description.to_string(),
            price,
        })
        .collect()
}

pub fn plan_budget(budget: u32, price_range: u32, destination: Option<&str>) -> Result<BudgetPlan, InputError> {
    let budget = validate_budget(budget)?;
    let price_range = validate_budget(price_range)?;
    let destination = destination
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string);

    Ok(BudgetPlan {
        budget,
        price_range,
        destination,
        suggestions: suggestions(price_range),
    })
}
