//! Price monitoring and updates

use tracing::debug;
use crate::shared::types::TransportMode;
use crate::shared::utils::IdGenerator;
use super::{PriceAnalyzer, PriceFeed, PriceRules, TargetHit, TickReport, TrackedRoute};

/// Owns the tracked routes, newest first
pub struct PriceMonitor {
    routes: Vec<TrackedRoute>,
    analyzer: PriceAnalyzer,
    ids: IdGenerator,
}

impl PriceMonitor {
    pub fn new(rules: PriceRules) -> Self {
        Self {
            routes: Vec::new(),
            analyzer: PriceAnalyzer::new(rules),
            ids: IdGenerator::new(),
        }
    }

    pub fn routes(&self) -> &[TrackedRoute] {
        &self.routes
    }

    pub fn get(&self, id: &str) -> Option<&TrackedRoute> {
        self.routes.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Start tracking a route; it goes to the front of the list
    pub fn track(
        &mut self,
        from: &str,
        to: &str,
        mode: TransportMode,
        price: i64,
        target: i64,
    ) -> &TrackedRoute {
        let entry = TrackedRoute {
            id: self.ids.next_id(),
            from: from.to_string(),
            to: to.to_string(),
            route: TrackedRoute::route_label(from, to),
            price: price.max(self.analyzer.rules().manual_drop_floor),
            target,
            mode,
        };
        debug!("Tracking {} ({}) at {}", entry.route, entry.mode, entry.price);
        self.routes.insert(0, entry);
        &self.routes[0]
    }

    /// Returns the removed route, if any
    pub fn untrack(&mut self, id: &str) -> Option<TrackedRoute> {
        let idx = self.routes.iter().position(|r| r.id == id)?;
        Some(self.routes.remove(idx))
    }

    /// Returns the new price, or `None` when the id is unknown
    pub fn drop_price(&mut self, id: &str, amount: i64) -> Option<i64> {
        let analyzer = &self.analyzer;
        let route = self.routes.iter_mut().find(|r| r.id == id)?;
        route.price = analyzer.apply_drop(route.price, amount);
        Some(route.price)
    }

    /// Move every route by one feed step.
    ///
    /// The new list is built in full and swapped in, so a tick is never observed half-applied.
    pub fn tick(&mut self, feed: &mut dyn PriceFeed) -> TickReport {
        let mut report = TickReport::default();

        let updated: Vec<TrackedRoute> = self
            .routes
            .iter()
            .map(|route| {
                let delta = feed.price_delta(route);
                let new_price = self.analyzer.apply_delta(route.price, delta);
                if self.analyzer.crossed_target(route.price, new_price, route.target) {
                    report.target_hits.push(TargetHit {
                        route_id: route.id.clone(),
                        route: route.route.clone(),
                        old_price: route.price,
                        new_price,
                        target: route.target,
                    });
                }
                TrackedRoute {
                    price: new_price,
                    ..route.clone()
                }
            })
            .collect();

        report.routes_updated = updated.len();
        self.routes = updated;
        report.market_update = feed.market_update();
        report
    }
}

impl Default for PriceMonitor {
    fn default() -> Self {
        Self::new(PriceRules::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::price::ScriptedFeed;

    fn monitor_with(prices: &[(i64, i64)]) -> PriceMonitor {
        let mut monitor = PriceMonitor::default();
        for (i, (price, target)) in prices.iter().enumerate() {
            monitor.track(&format!("From{}", i), &format!("To{}", i), TransportMode::Train, *price, *target);
        }
        monitor
    }

    #[test]
    fn test_track_prepends_newest_first() {
        let mut monitor = PriceMonitor::default();
        let first = monitor.track("A", "B", TransportMode::Car, 1000, 950).id.clone();
        let second = monitor.track("C", "D", TransportMode::Bus, 2000, 1900).id.clone();

        assert_eq!(monitor.routes()[0].id, second);
        assert_eq!(monitor.routes()[1].id, first);
        assert_ne!(first, second);
        assert_eq!(monitor.routes()[1].route, "A → B");
    }

    #[test]
    fn test_blank_sides_are_labelled_unknown() {
        let mut monitor = PriceMonitor::default();
        let route = monitor.track("", "Goa", TransportMode::Flight, 1000, 950);
        assert_eq!(route.route, "Unknown → Goa");
    }

    #[test]
    fn test_untrack_missing_is_noop() {
        let mut monitor = monitor_with(&[(1000, 900)]);
        assert!(monitor.untrack("nope").is_none());
        assert_eq!(monitor.len(), 1);

        let id = monitor.routes()[0].id.clone();
        assert!(monitor.untrack(&id).is_some());
        assert!(monitor.is_empty());
    }

    #[test]
    fn test_drop_price_clamps_to_one() {
        let mut monitor = monitor_with(&[(500, 400)]);
        let id = monitor.routes()[0].id.clone();
        assert_eq!(monitor.drop_price(&id, 800), Some(1));
        assert_eq!(monitor.drop_price(&id, 800), Some(1));
        assert_eq!(monitor.drop_price("missing", 800), None);
    }

    #[test]
    fn test_tick_applies_floor_to_every_route() {
        let mut monitor = monitor_with(&[(100, 0), (60, 0), (5000, 0)]);
        let mut feed = ScriptedFeed::constant(-400);

        let report = monitor.tick(&mut feed);
        assert_eq!(report.routes_updated, 3);
        let prices: Vec<i64> = monitor.routes().iter().map(|r| r.price).collect();
        assert_eq!(prices, vec![4600, 50, 50]);
        assert!(monitor.routes().iter().all(|r| r.price >= 50));
    }

    #[test]
    fn test_tick_reports_target_crossing_once_per_drop() {
        let mut monitor = monitor_with(&[(4600, 4500)]);
        let mut feed = ScriptedFeed::new(vec![-200, 0, 100, -50], vec![]);

        let hits = monitor.tick(&mut feed).target_hits;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].new_price, 4400);
        assert_eq!(hits[0].old_price, 4600);

        // flat below target
        assert!(monitor.tick(&mut feed).target_hits.is_empty());
        // rises, still below target
        assert!(monitor.tick(&mut feed).target_hits.is_empty());
        // drops again
        assert_eq!(monitor.tick(&mut feed).target_hits.len(), 1);
    }

    #[test]
    fn test_tick_market_update_once_per_tick() {
        let mut monitor = monitor_with(&[(1000, 0), (2000, 0)]);
        let mut feed = ScriptedFeed::new(vec![0], vec![true]);
        assert!(monitor.tick(&mut feed).market_update);

        let mut empty = PriceMonitor::default();
        assert!(empty.tick(&mut feed).market_update);
    }
}
