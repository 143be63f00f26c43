//! Error handling for the application

use thiserror::Error;

/// Configuration-related errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {reason}")]
    Unreadable { path: String, reason: String },

    #[error("Failed to parse config file: {0}")]
    Malformed(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Input-related errors raised by the CLI surface
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("Budget {0} is outside the supported range {1}..={2}")]
    BudgetOutOfRange(u32, u32, u32),

    #[error("Invalid route spec '{0}', expected FROM:TO:MODE:PRICE[:TARGET]")]
    InvalidRouteSpec(String),

    #[error("Invalid number '{0}'")]
    InvalidNumber(String),
}

/// General application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InputError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Simulation error: {0}")]
    Simulation(String),
}
