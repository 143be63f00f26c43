//! Common types used across the application

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the traveller gets from origin to destination.
///
/// Labels are matched exactly; anything unrecognised is kept verbatim as
/// [`TransportMode::Other`] and priced with the default factor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransportMode {
    Flight,
    Train,
    Car,
    Bus,
    Bike,
    Other(String),
}

impl TransportMode {
    pub const KNOWN: [TransportMode; 5] = [
        TransportMode::Flight,
        TransportMode::Train,
        TransportMode::Car,
        TransportMode::Bus,
        TransportMode::Bike,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            TransportMode::Flight => "Flight",
            TransportMode::Train => "Train",
            TransportMode::Car => "Car",
            TransportMode::Bus => "Bus",
            TransportMode::Bike => "Bike",
            TransportMode::Other(label) => label,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, TransportMode::Other(_))
    }
}

impl Default for TransportMode {
    fn default() -> Self {
        TransportMode::Flight
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportMode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Flight" => TransportMode::Flight,
            "Train" => TransportMode::Train,
            "Car" => TransportMode::Car,
            "Bus" => TransportMode::Bus,
            "Bike" => TransportMode::Bike,
            other => TransportMode::Other(other.to_string()),
        })
    }
}

impl From<String> for TransportMode {
    fn from(label: String) -> Self {
        match label.parse() {
            Ok(mode) => mode,
            Err(never) => match never {},
        }
    }
}

impl From<TransportMode> for String {
    fn from(mode: TransportMode) -> Self {
        match mode {
            TransportMode::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

/// Route seeded into the tracker at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedRoute {
    pub from: String,
    pub to: String,
    pub mode: TransportMode,
    pub price: i64,
    pub target: Option<i64>,
}

/// Simulation loop configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub enabled: bool,
    pub interval_secs: u64,
    pub max_delta: i64,
    pub price_floor: i64,
    pub market_update_probability: f64,
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 3,
            max_delta: 400,
            price_floor: 50,
            market_update_probability: 0.12,
            seed: None,
        }
    }
}

/// Tracking defaults for explicit and implicit tracks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    pub default_target_ratio: f64,
    pub plan_target_ratio: f64,
    pub plan_min_initial: i64,
    pub manual_drop_amount: i64,
    pub manual_drop_floor: i64,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            default_target_ratio: 0.95,
            plan_target_ratio: 0.9,
            plan_min_initial: 500,
            manual_drop_amount: 800,
            manual_drop_floor: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    pub capacity: usize,
    pub welcome: Option<String>,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            capacity: 12,
            welcome: Some("Welcome to PacknGo — alerts will appear here".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Planner configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub simulation: SimulationConfig,
    pub tracking: TrackingConfig,
    pub alerts: AlertConfig,
    pub logging: LoggingConfig,
    pub routes: Vec<SeedRoute>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            tracking: TrackingConfig::default(),
            alerts: AlertConfig::default(),
            logging: LoggingConfig::default(),
            routes: demo_routes(),
        }
    }
}

/// Routes shown on first launch
pub fn demo_routes() -> Vec<SeedRoute> {
    let seed = |from: &str, to: &str, mode, price, target| SeedRoute {
        from: from.to_string(),
        to: to.to_string(),
        mode,
        price,
        target: Some(target),
    };
    vec![
        seed("Delhi", "Goa", TransportMode::Flight, 4999, 4500),
        seed("Mumbai", "Paris", TransportMode::Flight, 45999, 42000),
        seed("Bengaluru", "Dharamshala", TransportMode::Train, 6999, 6000),
        seed("Kolkata", "Shillong", TransportMode::Car, 8999, 8200),
    ]
}
