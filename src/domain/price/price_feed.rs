//! Price feed implementations

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use super::TrackedRoute;
use crate::shared::utils::round_half_up;

/// Source of price movements for the simulation
pub trait PriceFeed {
    /// Signed price change for one route on the current tick
    fn price_delta(&mut self, route: &TrackedRoute) -> i64;

    /// Whether this tick carries a generic market update
    fn market_update(&mut self) -> bool;
}

/// Uniform random walk in `[-max_delta, +max_delta]`
pub struct RandomWalkFeed {
    rng: StdRng,
    max_delta: i64,
    market_update_probability: f64,
}

impl RandomWalkFeed {
    pub fn new(max_delta: i64, market_update_probability: f64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            max_delta,
            market_update_probability,
        }
    }
}

impl PriceFeed for RandomWalkFeed {
    fn price_delta(&mut self, _route: &TrackedRoute) -> i64 {
        let u: f64 = self.rng.gen();
        round_half_up((u - 0.5) * 2.0 * self.max_delta as f64) as i64
    }

    fn market_update(&mut self) -> bool {
        self.rng.gen::<f64>() < self.market_update_probability
    }
}

/// Replays fixed deltas and market flags, cycling when exhausted.
///
/// Used for deterministic replays and in tests.
#[derive(Debug, Clone, Default)]
pub struct ScriptedFeed {
    deltas: Vec<i64>,
    market_updates: Vec<bool>,
    delta_cursor: usize,
    market_cursor: usize,
}

impl ScriptedFeed {
    pub fn new(deltas: Vec<i64>, market_updates: Vec<bool>) -> Self {
        Self {
            deltas,
            market_updates,
            delta_cursor: 0,
            market_cursor: 0,
        }
    }

    /// Every route moves by the same delta, no market updates
    pub fn constant(delta: i64) -> Self {
        Self::new(vec![delta], Vec::new())
    }
}

impl PriceFeed for ScriptedFeed {
    fn price_delta(&mut self, _route: &TrackedRoute) -> i64 {
        if self.deltas.is_empty() {
            return 0;
        }
        let delta = self.deltas[self.delta_cursor % self.deltas.len()];
        self.delta_cursor += 1;
        delta
    }

    fn market_update(&mut self) -> bool {
        if self.market_updates.is_empty() {
            return false;
        }
        let flag = self.market_updates[self.market_cursor % self.market_updates.len()];
        self.market_cursor += 1;
        flag
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::types::TransportMode;

    fn route() -> TrackedRoute {
        TrackedRoute {
            id: "p1".to_string(),
            from: "Delhi".to_string(),
            to: "Goa".to_string(),
            route: "Delhi → Goa".to_string(),
            price: 4999,
            target: 4500,
            mode: TransportMode::Flight,
        }
    }

    #[test]
    fn test_random_walk_stays_in_range() {
        let mut feed = RandomWalkFeed::new(400, 0.12, Some(7));
        let route = route();
        for _ in 0..10_000 {
            let delta = feed.price_delta(&route);
            assert!((-400..=400).contains(&delta));
        }
    }

    #[test]
    fn test_seeded_walk_is_reproducible() {
        let route = route();
        let mut a = RandomWalkFeed::new(400, 0.12, Some(42));
        let mut b = RandomWalkFeed::new(400, 0.12, Some(42));
        let xs: Vec<i64> = (0..32).map(|_| a.price_delta(&route)).collect();
        let ys: Vec<i64> = (0..32).map(|_| b.price_delta(&route)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_market_update_probability_bounds() {
        let mut never = RandomWalkFeed::new(400, 0.0, Some(1));
        let mut always = RandomWalkFeed::new(400, 1.0, Some(1));
        for _ in 0..1000 {
            assert!(!never.market_update());
            assert!(always.market_update());
        }
    }

    #[test]
    fn test_scripted_feed_cycles() {
        let route = route();
        let mut feed = ScriptedFeed::new(vec![-100, 50], vec![true, false]);
        assert_eq!(feed.price_delta(&route), -100);
        assert_eq!(feed.price_delta(&route), 50);
        assert_eq!(feed.price_delta(&route), -100);
        assert!(feed.market_update());
        assert!(!feed.market_update());
        assert!(feed.market_update());
    }
}
