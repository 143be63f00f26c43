//! Price domain - tracked routes and their simulated prices

mod price_monitor;
mod price_feed;
mod price_analyzer;

pub use price_monitor::PriceMonitor;
pub use price_feed::{PriceFeed, RandomWalkFeed, ScriptedFeed};
pub use price_analyzer::PriceAnalyzer;

use serde::{Deserialize, Serialize};
use crate::shared::types::TransportMode;

/// A monitored origin-destination pair with a fluctuating price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedRoute {
    pub id: String,
    pub from: String,
    pub to: String,
    /// Display label, `from → to`
    pub route: String,
    pub price: i64,
    /// Alert threshold; zero means no target
    pub target: i64,
    pub mode: TransportMode,
}

impl TrackedRoute {
    pub fn route_label(from: &str, to: &str) -> String {
        let side = |s: &str| if s.trim().is_empty() { "Unknown".to_string() } else { s.to_string() };
        format!("{} → {}", side(from), side(to))
    }
}

/// A route whose price crossed down through its target on a tick
#[derive(Debug, Clone, PartialEq)]
pub struct TargetHit {
    pub route_id: String,
    pub route: String,
    pub old_price: i64,
    pub new_price: i64,
    pub target: i64,
}

/// Outcome of one simulation tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub routes_updated: usize,
    pub target_hits: Vec<TargetHit>,
    pub market_update: bool,
}

/// Price bounds applied by the simulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRules {
    pub tick_floor: i64,
    pub manual_drop_floor: i64,
}

impl Default for PriceRules {
    fn default() -> Self {
        Self {
            tick_floor: 50,
            manual_drop_floor: 1,
        }
    }
}
