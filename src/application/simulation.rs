//! Periodic price simulation driving the planner's tick

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};
use crate::application::planner::{PlannerSnapshot, TripPlanner};
use crate::domain::price::{PriceFeed, RandomWalkFeed};
use crate::shared::types::SimulationConfig;

pub type SharedPlanner = Arc<RwLock<TripPlanner>>;
pub type SharedFeed = Arc<Mutex<Box<dyn PriceFeed + Send>>>;

/// Cancellation handle for a running tick loop.
///
/// Stopping, or dropping the handle, aborts the task; no tick runs afterwards.
pub struct SimulationHandle {
    task: JoinHandle<()>,
}

impl SimulationHandle {
    pub fn stop(self) {
        self.task.abort();
    }
}

impl Drop for SimulationHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Spawn a tick loop; the first tick fires one full period after the call
pub fn spawn_ticker(planner: SharedPlanner, feed: SharedFeed, period: Duration) -> SimulationHandle {
    let first_tick = Instant::now() + period;
    let task = tokio::spawn(async move {
        let mut ticker = interval_at(first_tick, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let mut feed = feed.lock().await;
            let mut planner = planner.write().await;
            let report = planner.tick(&mut **feed);
            debug!("Simulation tick updated {} routes", report.routes_updated);
        }
    });
    SimulationHandle { task }
}

/// On/off switch for the simulation. Enabling always starts a fresh interval.
pub struct PriceSimulation {
    planner: SharedPlanner,
    feed: SharedFeed,
    period: Duration,
    handle: Option<SimulationHandle>,
}

impl PriceSimulation {
    pub fn new(planner: SharedPlanner, feed: Box<dyn PriceFeed + Send>, period: Duration) -> Self {
        Self {
            planner,
            feed: Arc::new(Mutex::new(feed)),
            period,
            handle: None,
        }
    }

    /// Random-walk simulation configured from `[simulation]`
    pub fn from_config(planner: SharedPlanner, config: &SimulationConfig) -> Self {
        let feed = RandomWalkFeed::new(config.max_delta, config.market_update_probability, config.seed);
        Self::new(planner, Box::new(feed), Duration::from_secs(config.interval_secs))
    }

    pub fn planner(&self) -> SharedPlanner {
        Arc::clone(&self.planner)
    }

    pub fn is_enabled(&self) -> bool {
        self.handle.is_some()
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled {
            self.start();
        } else {
            self.stop();
        }
    }

    pub fn start(&mut self) {
        if self.handle.is_some() {
            return;
        }
        info!("▶️  Price simulation started ({:?} interval)", self.period);
        self.handle = Some(spawn_ticker(
            Arc::clone(&self.planner),
            Arc::clone(&self.feed),
            self.period,
        ));
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.stop();
            info!("⏸️  Price simulation stopped");
        }
    }

    /// Planner snapshot carrying the current on/off state
    pub async fn snapshot(&self) -> PlannerSnapshot {
        self.planner.read().await.snapshot_with(self.is_enabled())
    }
}

impl Drop for PriceSimulation {
    fn drop(&mut self) {
        self.stop();
    }
}
