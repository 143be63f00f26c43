//! PacknGo - trip planner with simulated live fares
//! Domain logic is synchronous; the application layer drives it on a tokio interval

pub mod domain;
pub mod application;
pub mod shared;

// Re-export main types for convenience
pub use application::{PriceSimulation, TripPlanner};
pub use domain::estimate::estimate_cost;
pub use domain::price::PriceMonitor;
pub use shared::config::ConfigLoader;
pub use shared::errors::AppError;
pub use shared::types::{PlannerConfig, TransportMode};
