//! Deterministic trip cost estimates derived from place names.
//!
//! There is no distance data behind this: both place names are hashed and the
//! difference of the hashes stands in for a distance. The recurrence must stay
//! exactly as it is, since estimates shown to users (and recorded targets)
//! are derived from it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::shared::types::TransportMode;
use crate::shared::utils::round_half_up;

pub const COST_PER_KM: f64 = 2.5;
pub const MIN_DISTANCE: i64 = 50;
pub const DISTANCE_SPREAD: i64 = 1500;
pub const MIN_ESTIMATE: i64 = 50;
pub const DEFAULT_MODE_FACTOR: f64 = 0.8;

/// Last estimate shown to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    pub route_label: String,
    pub mode: TransportMode,
    pub amount: i64,
    pub date: Option<NaiveDate>,
}

/// String hash over UTF-16 code units: `h = int32(h << 5) - h + code`, then `|h|`.
///
/// The shift operates on the low 32 bits of `h` while the subtraction uses
/// the full value, so intermediate values are carried in an `i64`.
pub fn hash_place(s: &str) -> i64 {
    let mut h: i64 = 0;
    for code in s.encode_utf16() {
        let shifted = (h as i32).wrapping_shl(5) as i64;
        h = shifted - h + code as i64;
    }
    h.abs()
}

pub fn mode_factor(mode: &TransportMode) -> f64 {
    match mode {
        TransportMode::Flight => 1.2,
        TransportMode::Train => 0.5,
        TransportMode::Car => 0.9,
        TransportMode::Bus => 0.4,
        TransportMode::Bike => 0.2,
        TransportMode::Other(_) => DEFAULT_MODE_FACTOR,
    }
}

/// Pseudo distance between two places, in `50..1550`
pub fn base_distance(from: &str, to: &str) -> i64 {
    let place = |s: &str| if s.is_empty() { hash_place("0") } else { hash_place(s) };
    (place(from) - place(to)).abs() % DISTANCE_SPREAD + MIN_DISTANCE
}

/// Estimated fare in whole rupees. The travel date is accepted but does not affect the result.
pub fn estimate_cost(from: &str, to: &str, mode: &TransportMode, _date: Option<NaiveDate>) -> i64 {
    let distance = base_distance(from, to) as f64;
    let estimate = round_half_up(distance * COST_PER_KM * mode_factor(mode)) as i64;
    estimate.max(MIN_ESTIMATE)
}

/// Label used for estimates; blank sides show as `X` / `Y`
pub fn estimate_label(from: &str, to: &str) -> String {
    let from = if from.is_empty() { "X" } else { from };
    let to = if to.is_empty() { "Y" } else { to };
    format!("{} → {}", from, to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_known_values() {
        assert_eq!(hash_place(""), 0);
        assert_eq!(hash_place("0"), 48);
        assert_eq!(hash_place("a"), 97);
        assert_eq!(hash_place("Goa"), 71769);
        assert_eq!(hash_place("Delhi"), 65915436);
        assert_eq!(hash_place("Mumbai"), 1979126203);
        assert_eq!(hash_place("Paris"), 76884331);
    }

    #[test]
    fn test_hash_carries_past_32_bits() {
        assert_eq!(
            hash_place("a very long destination name that overflows"),
            14050396510
        );
    }

    #[test]
    fn test_estimate_known_values() {
        assert_eq!(estimate_cost("Delhi", "Goa", &TransportMode::Flight, None), 3651);
        assert_eq!(estimate_cost("Delhi", "Goa", &TransportMode::Bus, None), 1217);
        assert_eq!(estimate_cost("Mumbai", "Paris", &TransportMode::Train, None), 528);
        assert_eq!(estimate_cost("Bengaluru", "Dharamshala", &TransportMode::Car, None), 974);
    }

    #[test]
    fn test_unknown_mode_uses_default_factor() {
        let rocket = TransportMode::Other("Rocket".to_string());
        assert_eq!(estimate_cost("Delhi", "Goa", &rocket, None), 2434);
    }

    #[test]
    fn test_estimate_is_symmetric_and_deterministic() {
        let places = ["Delhi", "Goa", "Paris", "", "Kolkata", "Shillong", "Zürich"];
        for a in places {
            for b in places {
                for mode in TransportMode::KNOWN.iter() {
                    let ab = estimate_cost(a, b, mode, None);
                    assert_eq!(ab, estimate_cost(b, a, mode, None));
                    assert_eq!(ab, estimate_cost(a, b, mode, None));
                    assert!(ab >= MIN_ESTIMATE);
                }
            }
        }
    }

    #[test]
    fn test_same_place_hits_distance_floor() {
        assert_eq!(base_distance("Goa", "Goa"), 50);
        assert_eq!(estimate_cost("Goa", "Goa", &TransportMode::Bike, None), 50);
        assert_eq!(estimate_cost("", "", &TransportMode::Flight, None), 150);
    }

    #[test]
    fn test_date_does_not_change_estimate() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 24);
        assert_eq!(
            estimate_cost("Delhi", "Goa", &TransportMode::Flight, date),
            estimate_cost("Delhi", "Goa", &TransportMode::Flight, None)
        );
    }

    #[test]
    fn test_estimate_label() {
        assert_eq!(estimate_label("Delhi", ""), "Delhi → Y");
        assert_eq!(estimate_label("", ""), "X → Y");
    }
}
