//! Application layer - planner state, simulation runtime and CLI commands

pub mod planner;
pub mod simulation;
pub mod commands;

pub use planner::{NewTrack, PlannerSnapshot, TripPlanner};
pub use simulation::{PriceSimulation, SimulationHandle};
pub use commands::{Cli, Commands, CommandExecutor};
