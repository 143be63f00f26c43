//! CLI commands and handlers
use clap::{Parser, Subcommand};
use chrono::NaiveDate;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{info, warn};
use crate::application::planner::{NewTrack, PlannerSnapshot, TripPlanner};
use crate::application::simulation::PriceSimulation;
use crate::domain::budget::{plan_budget, BudgetPlan};
use crate::domain::estimate::mode_factor;
use crate::domain::split::coerce_number;
use crate::shared::config::ConfigLoader;
use crate::shared::errors::{AppError, InputError};
use crate::shared::types::{PlannerConfig, TransportMode};
use crate::shared::utils::{format_rupee, format_rupee_decimal};

#[derive(Parser)]
#[command(name = "packngo", version)]
#[command(about = "PacknGo trip planner: price tracking, estimates, itineraries and cost splitting")]
pub struct Cli {
    /// Path to config file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print the resulting planner state as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Estimate the fare between two places
    Estimate {
        #[arg(long)]
        from: String,

        #[arg(long)]
        to: String,

        /// Transport mode (Flight, Train, Car, Bus, Bike)
        #[arg(short, long, default_value = "Flight")]
        mode: TransportMode,

        /// Travel date (YYYY-MM-DD); recorded, does not change the estimate
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Estimate, start tracking and build an itinerary
    Plan {
        #[arg(long, default_value = "")]
        from: String,

        #[arg(long, default_value = "")]
        to: String,

        #[arg(short, long, default_value = "Flight")]
        mode: TransportMode,
    },

    /// Build the three-day itinerary for a destination
    Itinerary {
        destination: Option<String>,

        /// Save the generated plan
        #[arg(long)]
        save: bool,

        /// Save the activity at this position (0-based)
        #[arg(long)]
        save_activity: Option<usize>,
    },

    /// Split a total cost between travellers
    Split {
        #[arg(short, long, default_value = "20000")]
        total: String,

        #[arg(short, long, default_value = "4")]
        people: String,
    },

    /// Tiered suggestions for a budget
    Budget {
        #[arg(short, long, default_value_t = 50_000)]
        budget: u32,

        #[arg(short, long, default_value_t = 50_000)]
        price_range: u32,

        #[arg(short, long)]
        destination: Option<String>,
    },

    /// Run the live price simulation
    Simulate {
        /// Run time in seconds (until Ctrl-C if omitted)
        #[arg(short, long)]
        duration: Option<u64>,

        /// Tick interval in seconds (overrides config)
        #[arg(short, long)]
        interval: Option<u64>,

        /// Random seed for reproducible runs (overrides config)
        #[arg(long)]
        seed: Option<u64>,

        /// Extra route to track, FROM:TO:MODE:PRICE[:TARGET]
        #[arg(long = "track")]
        tracks: Vec<String>,

        /// Start without the configured seed routes
        #[arg(long)]
        no_seed_routes: bool,

        /// Simulate a manual price drop on the tracked route at this position
        #[arg(long = "drop")]
        drops: Vec<usize>,
    },

    /// Show configuration and seeded routes
    Status {
        #[arg(short, long)]
        detailed: bool,
    },
}

pub struct CommandExecutor;

struct SimulateRun {
    duration: Option<u64>,
    interval: Option<u64>,
    seed: Option<u64>,
    tracks: Vec<String>,
    no_seed_routes: bool,
    drops: Vec<usize>,
}

impl CommandExecutor {
    /// Execute the selected command
    pub async fn execute(command: Commands, config: PlannerConfig, json: bool) -> Result<(), AppError> {
        match command {
            Commands::Estimate { from, to, mode, date } => {
                let mut planner = TripPlanner::empty(&config);
                let amount = planner.request_estimate(&from, &to, &mode, date);
                info!("💰 {} {} → {}: {}", mode, from, to, format_rupee(amount));
                Self::emit(&planner.snapshot(), json)
            }
            Commands::Plan { from, to, mode } => {
                let mut planner = TripPlanner::new(&config);
                if planner.plan_trip(&from, &to, mode).is_none() {
                    warn!("Trip not planned, origin and destination are both required");
                }
                Self::emit(&planner.snapshot(), json)
            }
            Commands::Itinerary { destination, save, save_activity } => {
                let mut planner = TripPlanner::empty(&config);
                planner.apply_destination_to_itinerary(destination.as_deref().unwrap_or(""));
                if let Some(index) = save_activity {
                    if !planner.save_activity(index) {
                        warn!("No activity at position {}", index);
                    }
                }
                if save {
                    planner.save_itinerary();
                }
                Self::emit(&planner.snapshot(), json)
            }
            Commands::Split { total, people } => {
                let mut planner = TripPlanner::empty(&config);
                planner.split_cost(coerce_number(&total), coerce_number(&people));
                Self::emit(&planner.snapshot(), json)
            }
            Commands::Budget { budget, price_range, destination } => {
                let plan = plan_budget(budget, price_range, destination.as_deref())?;
                Self::emit_budget(&plan, json)
            }
            Commands::Simulate { duration, interval, seed, tracks, no_seed_routes, drops } => {
                let run = SimulateRun { duration, interval, seed, tracks, no_seed_routes, drops };
                Self::execute_simulate_command(run, config, json).await
            }
            Commands::Status { detailed } => Self::execute_status_command(detailed, &config),
        }
    }

    /// Execute simulate command
    async fn execute_simulate_command(run: SimulateRun, mut config: PlannerConfig, json: bool) -> Result<(), AppError> {
        if let Some(interval) = run.interval {
            config.simulation.interval_secs = interval;
        }
        if run.seed.is_some() {
            config.simulation.seed = run.seed;
        }
        if run.no_seed_routes {
            config.routes.clear();
        }
        ConfigLoader::validate(&config)?;

        let mut planner = TripPlanner::new(&config);
        for spec in &run.tracks {
            planner.add_track(parse_route_spec(spec)?);
        }
        for &index in &run.drops {
            match planner.tracked().get(index).map(|route| route.id.clone()) {
                Some(id) => {
                    planner.manual_price_drop(&id, None);
                }
                None => warn!("No tracked route at position {}", index),
            }
        }
        info!("🚀 Simulating {} routes every {}s", planner.tracked().len(), config.simulation.interval_secs);

        let shared = Arc::new(RwLock::new(planner));
        let mut simulation = PriceSimulation::from_config(shared, &config.simulation);
        if config.simulation.enabled {
            simulation.set_enabled(true);
        } else {
            warn!("Simulation disabled in config, prices will not move");
        }

        match run.duration {
            Some(secs) => {
                info!("⏱️  Running for {} seconds", secs);
                tokio::select! {
                    _ = tokio::time::sleep(Duration::from_secs(secs)) => {}
                    _ = tokio::signal::ctrl_c() => info!("Interrupted"),
                }
            }
            None => {
                tokio::signal::ctrl_c()
                    .await
                    .map_err(|e| AppError::Simulation(format!("failed to wait for Ctrl-C: {}", e)))?;
                info!("Interrupted");
            }
        }
        let snapshot = simulation.snapshot().await;
        simulation.stop();

        Self::emit(&snapshot, json)
    }

    /// Execute status command
    fn execute_status_command(detailed: bool, config: &PlannerConfig) -> Result<(), AppError> {
        println!("PacknGo {}", env!("CARGO_PKG_VERSION"));
        println!(
            "Simulation: {} every {}s, step ±{}, floor {}, market updates {:.0}%",
            if config.simulation.enabled { "on" } else { "off" },
            config.simulation.interval_secs,
            config.simulation.max_delta,
            format_rupee(config.simulation.price_floor),
            config.simulation.market_update_probability * 100.0
        );
        println!("Alerts kept: {}", config.alerts.capacity);
        println!("Seed routes: {}", config.routes.len());
        for route in &config.routes {
            let target = route.target.map(format_rupee).unwrap_or_else(|| "default".to_string());
            println!(
                "  {} → {} ({}) {} target {}",
                route.from,
                route.to,
                route.mode,
                format_rupee(route.price),
                target
            );
        }

        if detailed {
            println!("Tracking:");
            println!("  default target ratio: {}", config.tracking.default_target_ratio);
            println!("  planned target ratio: {}", config.tracking.plan_target_ratio);
            println!("  planned minimum price: {}", format_rupee(config.tracking.plan_min_initial));
            println!("  manual drop: {}", format_rupee(config.tracking.manual_drop_amount));
            println!("Mode factors:");
            for mode in TransportMode::KNOWN.iter() {
                println!("  {:<6} {}", mode.as_str(), mode_factor(mode));
            }
        }
        Ok(())
    }

    fn emit(snapshot: &PlannerSnapshot, json: bool) -> Result<(), AppError> {
        if json {
            println!("{}", snapshot.to_json()?);
            return Ok(());
        }

        if let Some(estimate) = &snapshot.estimate {
            println!("Estimate ({}) {}: {}", estimate.mode, estimate.route_label, format_rupee(estimate.amount));
        }
        if let Some(split) = &snapshot.split {
            println!("Split between {} people: {} per person", split.people, format_rupee_decimal(split.each));
        }
        if !snapshot.tracked.is_empty() {
            println!("Tracked routes:");
            for route in &snapshot.tracked {
                println!(
                    "  [{}] {} ({}) {} target {}",
                    route.id,
                    route.route,
                    route.mode,
                    format_rupee(route.price),
                    format_rupee(route.target)
                );
            }
        }
        if snapshot.simulation_enabled {
            println!("Price simulation: running");
        }
        println!("Itinerary:");
        for day in snapshot.itinerary.days() {
            println!("  {}", day);
        }
        println!("Activities:");
        for activity in &snapshot.activities {
            println!("  {} at {}", activity.title, activity.time);
        }
        println!("Alerts:");
        for alert in &snapshot.alerts {
            println!("  {}", alert);
        }
        Ok(())
    }

    fn emit_budget(plan: &BudgetPlan, json: bool) -> Result<(), AppError> {
        if json {
            println!("{}", serde_json::to_string_pretty(plan)?);
            return Ok(());
        }

        match &plan.destination {
            Some(destination) => println!("Trip to {} with a budget of {}", destination, format_rupee(plan.budget as i64)),
            None => println!("Budget: {}", format_rupee(plan.budget as i64)),
        }
        println!("Suggestions for a price range of {}:", format_rupee(plan.price_range as i64));
        for suggestion in &plan.suggestions {
            println!(
                "  {:<7} {:>9}  {}",
                suggestion.tier.to_string(),
                format_rupee(suggestion.price),
                suggestion.description
            );
        }
        Ok(())
    }
}

/// Parse `FROM:TO:MODE:PRICE[:TARGET]`
pub fn parse_route_spec(spec: &str) -> Result<NewTrack, InputError> {
    let parts: Vec<&str> = spec.split(':').map(str::trim).collect();
    if !(4..=5).contains(&parts.len()) || parts[0].is_empty() || parts[1].is_empty() {
        return Err(InputError::InvalidRouteSpec(spec.to_string()));
    }

    let number = |s: &str| s.parse::<i64>().map_err(|_| InputError::InvalidNumber(s.to_string()));
    let mode: TransportMode = TransportMode::from(parts[2].to_string());
    let mut track = NewTrack::new(parts[0], parts[1], mode, number(parts[3])?);
    if let Some(target) = parts.get(4) {
        track = track.with_target(number(target)?);
    }
    Ok(track)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_route_spec() {
        let track = parse_route_spec("Delhi:Goa:Flight:4999:4500").unwrap();
        assert_eq!(track.from, "Delhi");
        assert_eq!(track.to, "Goa");
        assert_eq!(track.mode, TransportMode::Flight);
        assert_eq!(track.initial, 4999);
        assert_eq!(track.target, Some(4500));

        let track = parse_route_spec("Pune:Lonavala:Bike:700").unwrap();
        assert_eq!(track.target, None);
    }

    #[test]
    fn test_parse_route_spec_rejects_bad_input() {
        assert!(matches!(parse_route_spec("Delhi:Goa"), Err(InputError::InvalidRouteSpec(_))));
        assert!(matches!(parse_route_spec(":Goa:Car:100"), Err(InputError::InvalidRouteSpec(_))));
        assert!(matches!(parse_route_spec("Delhi:Goa:Car:cheap"), Err(InputError::InvalidNumber(_))));
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from([
            "packngo", "--json", "estimate", "--from", "Delhi", "--to", "Goa", "--mode", "Train", "--date", "2025-12-24",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Estimate { from, mode, date, .. } => {
                assert_eq!(from, "Delhi");
                assert_eq!(mode, TransportMode::Train);
                assert_eq!(date, NaiveDate::from_ymd_opt(2025, 12, 24));
            }
            _ => panic!("expected estimate"),
        }

        let cli = Cli::try_parse_from(["packngo", "simulate", "--track", "A:B:Car:1000", "--track", "C:D:Bus:500:450", "-d", "5", "--drop", "1"]).unwrap();
        match cli.command {
            Commands::Simulate { tracks, duration, drops, .. } => {
                assert_eq!(tracks.len(), 2);
                assert_eq!(drops, vec![1]);
                assert_eq!(duration, Some(5));
            }
            _ => panic!("expected simulate"),
        }
    }

    #[tokio::test]
    async fn test_budget_out_of_range_is_an_error() {
        let result = CommandExecutor::execute(
            Commands::Budget { budget: 1_000, price_range: 50_000, destination: None },
            PlannerConfig::default(),
            true,
        )
        .await;
        assert!(matches!(result, Err(AppError::InvalidInput(InputError::BudgetOutOfRange(1_000, _, _)))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulate_runs_for_duration() {
        let result = CommandExecutor::execute(
            Commands::Simulate {
                duration: Some(7),
                interval: Some(3),
                seed: Some(1),
                tracks: vec!["A:B:Car:1000".to_string()],
                no_seed_routes: true,
                drops: vec![0, 5],
            },
            PlannerConfig::default(),
            true,
        )
        .await;
        assert!(result.is_ok());
    }
}
