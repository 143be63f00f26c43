//! Group cost splitting

use serde::{Deserialize, Serialize};
use crate::shared::utils::round_cents;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitResult {
    pub people: u32,
    /// Per-person share, rounded to two decimals
    pub each: f64,
}

/// Lenient number coercion for form input: blank is zero, garbage is NaN
pub fn coerce_number(input: &str) -> f64 {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Split `total` evenly. Head counts that are zero, unparseable or below one count as one person.
pub fn split_cost(total: f64, people: f64) -> SplitResult {
    let people = if people.is_finite() && people >= 1.0 {
        people.trunc().min(u32::MAX as f64) as u32
    } else {
        1
    };
    let total = if total.is_finite() { total } else { 0.0 };

    SplitResult {
        people,
        each: round_cents(total / people as f64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_split() {
        let result = split_cost(20000.0, 4.0);
        assert_eq!(result.people, 4);
        assert_eq!(result.each, 5000.00);
    }

    #[test]
    fn test_rounds_to_cents() {
        assert_eq!(split_cost(1000.0, 3.0).each, 333.33);
        assert_eq!(split_cost(100.0, 6.0).each, 16.67);
    }

    #[test]
    fn test_zero_or_garbage_people_count_as_one() {
        assert_eq!(split_cost(900.0, 0.0), SplitResult { people: 1, each: 900.0 });
        assert_eq!(split_cost(900.0, f64::NAN).people, 1);
        assert_eq!(split_cost(900.0, -3.0).people, 1);
        assert_eq!(split_cost(900.0, 2.7).people, 2);
    }

    #[test]
    fn test_huge_total_stays_finite() {
        let result = split_cost(f64::MAX, 0.5);
        assert_eq!(result.people, 1);
        assert!(result.each.is_finite());
        assert_eq!(result.each, f64::MAX);
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number(" 20000 "), 20000.0);
        assert_eq!(coerce_number(""), 0.0);
        assert_eq!(coerce_number("12.5"), 12.5);
        assert!(coerce_number("four").is_nan());
        assert_eq!(split_cost(coerce_number("abc"), coerce_number("2")).each, 0.0);
    }
}
