//! Trip planner controller: owns every piece of planner state

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};
use crate::domain::alerts::{AlertEntry, AlertFeed};
use crate::domain::estimate::{estimate_cost, estimate_label, CostEstimate};
use crate::domain::itinerary::{default_activities, localized_activities, Itinerary, LocalizedActivity};
use crate::domain::price::{PriceFeed, PriceMonitor, PriceRules, TickReport, TrackedRoute};
use crate::domain::split::{split_cost, SplitResult};
use crate::shared::types::{PlannerConfig, TrackingConfig, TransportMode};
use crate::shared::utils::{format_rupee, format_rupee_decimal, round_half_up};

/// Request to start tracking a route
#[derive(Debug, Clone, PartialEq)]
pub struct NewTrack {
    pub from: String,
    pub to: String,
    pub mode: TransportMode,
    pub initial: i64,
    /// Alert threshold; `None` or zero falls back to the default ratio of `initial`
    pub target: Option<i64>,
}

impl NewTrack {
    pub fn new(from: &str, to: &str, mode: TransportMode, initial: i64) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            mode,
            initial,
            target: None,
        }
    }

    pub fn with_target(mut self, target: i64) -> Self {
        self.target = Some(target);
        self
    }
}

/// Read-only view of the planner for display
#[derive(Debug, Clone, Serialize)]
pub struct PlannerSnapshot {
    pub tracked: Vec<TrackedRoute>,
    pub alerts: Vec<AlertEntry>,
    pub itinerary: Itinerary,
    pub activities: Vec<LocalizedActivity>,
    pub estimate: Option<CostEstimate>,
    pub split: Option<SplitResult>,
    /// Whether a price simulation is ticking this planner
    pub simulation_enabled: bool,
}

impl PlannerSnapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Single owner of tracked routes, alerts, itinerary and last results.
///
/// Every operation either completes or leaves state untouched; validation
/// problems are reported through the alert feed, never as errors.
pub struct TripPlanner {
    tracking: TrackingConfig,
    monitor: PriceMonitor,
    alerts: AlertFeed,
    itinerary: Itinerary,
    activities: Vec<LocalizedActivity>,
    estimate: Option<CostEstimate>,
    split: Option<SplitResult>,
}

impl TripPlanner {
    /// Planner with the configured seed routes and welcome alert
    pub fn new(config: &PlannerConfig) -> Self {
        let rules = PriceRules {
            tick_floor: config.simulation.price_floor,
            manual_drop_floor: config.tracking.manual_drop_floor,
        };
        let mut monitor = PriceMonitor::new(rules);
        // seeds are listed in display order, the monitor prepends
        for seed in config.routes.iter().rev() {
            let target = seed
                .target
                .filter(|t| *t != 0)
                .unwrap_or_else(|| round_half_up(seed.price as f64 * config.tracking.default_target_ratio) as i64);
            monitor.track(&seed.from, &seed.to, seed.mode.clone(), seed.price, target);
        }

        let mut alerts = AlertFeed::new(config.alerts.capacity);
        if let Some(welcome) = &config.alerts.welcome {
            alerts.push(welcome.clone());
        }

        Self {
            tracking: config.tracking.clone(),
            monitor,
            alerts,
            itinerary: Itinerary::default(),
            activities: default_activities(),
            estimate: None,
            split: None,
        }
    }

    /// Planner with nothing tracked and no welcome alert
    pub fn empty(config: &PlannerConfig) -> Self {
        let mut config = config.clone();
        config.routes.clear();
        config.alerts.welcome = None;
        Self::new(&config)
    }

    // --- Simulation ---

    /// One simulation step over every tracked route
    pub fn tick(&mut self, feed: &mut dyn PriceFeed) -> TickReport {
        let report = self.monitor.tick(feed);
        for hit in &report.target_hits {
            info!("🎯 {} hit target {} (now {})", hit.route, hit.target, hit.new_price);
            self.alerts.push(format!("{} hit target price {}", hit.route, format_rupee(hit.new_price)));
        }
        if report.market_update {
            self.alerts.push("Market update — dynamic prices refreshed");
        }
        debug!(
            "Tick: {} routes, {} target hits, market update: {}",
            report.routes_updated,
            report.target_hits.len(),
            report.market_update
        );
        report
    }

    // --- Price tracking ---

    /// Start tracking a route; returns the new route id
    pub fn add_track(&mut self, request: NewTrack) -> String {
        let target = request
            .target
            .filter(|t| *t != 0)
            .unwrap_or_else(|| round_half_up(request.initial as f64 * self.tracking.default_target_ratio) as i64);

        let route = self
            .monitor
            .track(&request.from, &request.to, request.mode, request.initial, target);
        let id = route.id.clone();
        let text = format!("Started tracking {} ({})", route.route, route.mode);
        info!("{} as {}", text, id);
        self.alerts.push(text);
        id
    }

    /// Returns false when nothing matched
    pub fn remove_track(&mut self, id: &str) -> bool {
        match self.monitor.untrack(id) {
            Some(route) => {
                info!("Stopped tracking {} ({})", route.route, route.id);
                self.alerts.push("Stopped tracking an item");
                true
            }
            None => {
                debug!("remove_track: no route {}", id);
                false
            }
        }
    }

    /// Drop a route's price by `amount` (default from config); returns the new price
    pub fn manual_price_drop(&mut self, id: &str, amount: Option<i64>) -> Option<i64> {
        let amount = amount.unwrap_or(self.tracking.manual_drop_amount);
        let new_price = self.monitor.drop_price(id, amount)?;
        info!("Manual drop of {} on {}, now {}", amount, id, new_price);
        self.alerts.push("Manual price drop simulated");
        Some(new_price)
    }

    // --- Estimates & planning ---

    /// The "Estimate" action: compute, record and announce an estimate
    pub fn request_estimate(
        &mut self,
        from: &str,
        to: &str,
        mode: &TransportMode,
        date: Option<NaiveDate>,
    ) -> i64 {
        let amount = self.record_estimate(from, to, mode, date);
        self.alerts.push(format!(
            "Estimated {} cost for {} → {} is {}",
            mode,
            from,
            to,
            format_rupee(amount)
        ));
        amount
    }

    fn record_estimate(&mut self, from: &str, to: &str, mode: &TransportMode, date: Option<NaiveDate>) -> i64 {
        let amount = estimate_cost(from, to, mode, date);
        debug!("Estimate {} → {} by {}: {}", from, to, mode, amount);
        self.estimate = Some(CostEstimate {
            route_label: estimate_label(from, to),
            mode: mode.clone(),
            amount,
            date,
        });
        amount
    }

    /// Estimate, track and build an itinerary in one go.
    ///
    /// Returns the new route id, or `None` when origin or destination is blank.
    pub fn plan_trip(&mut self, from: &str, to: &str, mode: TransportMode) -> Option<String> {
        if from.trim().is_empty() || to.trim().is_empty() {
            info!("Plan rejected: origin '{}' destination '{}'", from, to);
            self.alerts.push("Please enter both origin and destination");
            return None;
        }

        let estimated = self.record_estimate(from, to, &mode, None);
        let request = NewTrack {
            from: from.to_string(),
            to: to.to_string(),
            mode,
            initial: estimated.max(self.tracking.plan_min_initial),
            target: Some(round_half_up(estimated as f64 * self.tracking.plan_target_ratio) as i64),
        };
        let id = self.add_track(request);
        self.apply_destination_to_itinerary(to);
        Some(id)
    }

    // --- Itinerary ---

    pub fn apply_destination_to_itinerary(&mut self, destination: &str) {
        let activities = localized_activities(destination);
        self.itinerary = Itinerary::from_activities(&activities);
        self.activities = activities;

        let label = if destination.trim().is_empty() {
            "your destination"
        } else {
            destination
        };
        info!("Itinerary rebuilt for {}", label);
        self.alerts.push(format!("Personalized itinerary generated for {}", label));
    }

    pub fn save_itinerary(&mut self) {
        self.alerts.push("Itinerary saved (demo)");
    }

    /// Returns false for an out-of-range index
    pub fn save_activity(&mut self, index: usize) -> bool {
        let Some(activity) = self.activities.get(index) else {
            return false;
        };
        let text = format!("Saved activity: {}", activity.title);
        self.alerts.push(text);
        true
    }

    // --- Group split ---

    pub fn split_cost(&mut self, total: f64, people: f64) -> SplitResult {
        let result = split_cost(total, people);
        self.alerts.push(format!(
            "Cost split: {} x {}",
            format_rupee_decimal(result.each),
            result.people
        ));
        self.split = Some(result);
        result
    }

    // --- Read side ---

    pub fn tracked(&self) -> &[TrackedRoute] {
        self.monitor.routes()
    }

    pub fn route(&self, id: &str) -> Option<&TrackedRoute> {
        self.monitor.get(id)
    }

    pub fn alerts(&self) -> &AlertFeed {
        &self.alerts
    }

    pub fn itinerary(&self) -> &Itinerary {
        &self.itinerary
    }

    pub fn activities(&self) -> &[LocalizedActivity] {
        &self.activities
    }

    pub fn last_estimate(&self) -> Option<&CostEstimate> {
        self.estimate.as_ref()
    }

    pub fn last_split(&self) -> Option<SplitResult> {
        self.split
    }

    /// Snapshot of a planner with no simulation attached
    pub fn snapshot(&self) -> PlannerSnapshot {
        self.snapshot_with(false)
    }

    pub fn snapshot_with(&self, simulation_enabled: bool) -> PlannerSnapshot {
        PlannerSnapshot {
            tracked: self.monitor.routes().to_vec(),
            alerts: self.alerts.to_vec(),
            itinerary: self.itinerary.clone(),
            activities: self.activities.clone(),
            estimate: self.estimate.clone(),
            split: self.split,
            simulation_enabled,
        }
    }
}
