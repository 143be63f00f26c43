use std::fs;
use std::path::Path;
use tracing::debug;
use crate::shared::types::PlannerConfig;
use crate::shared::errors::{AppError, ConfigError};

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load `Config.toml` from the given path, or the built-in defaults when no path is given
    pub fn load_config(path: Option<&Path>) -> Result<PlannerConfig, AppError> {
        let config = match path {
            Some(path) => {
                let config_content = fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })?;
                debug!("Loaded config from {}", path.display());
                Self::parse(&config_content)?
            }
            None => PlannerConfig::default(),
        };

        Self::validate(&config)?;
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<PlannerConfig, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Malformed(e.to_string()))
    }

    pub fn validate(config: &PlannerConfig) -> Result<(), ConfigError> {
        let sim = &config.simulation;
        if sim.interval_secs == 0 {
            return Err(invalid("simulation.interval_secs", "must be greater than zero"));
        }
        if sim.max_delta < 0 {
            return Err(invalid("simulation.max_delta", "must not be negative"));
        }
        if sim.price_floor < 1 {
            return Err(invalid("simulation.price_floor", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&sim.market_update_probability) {
            return Err(invalid(
                "simulation.market_update_probability",
                "must be within 0.0..=1.0",
            ));
        }

        let tracking = &config.tracking;
        if tracking.default_target_ratio <= 0.0 || tracking.plan_target_ratio <= 0.0 {
            return Err(invalid("tracking.*_target_ratio", "must be positive"));
        }
        if tracking.manual_drop_floor < 1 {
            return Err(invalid("tracking.manual_drop_floor", "must be at least 1"));
        }

        if config.alerts.capacity == 0 {
            return Err(invalid("alerts.capacity", "must be greater than zero"));
        }

        for route in &config.routes {
            if route.price < 1 {
                return Err(ConfigError::InvalidValue {
                    field: "routes.price",
                    reason: format!("{} → {} has price {}", route.from, route.to, route.price),
                });
            }
        }

        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::types::TransportMode;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = ConfigLoader::parse("").unwrap();
        assert_eq!(config, PlannerConfig::default());
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config = ConfigLoader::parse(
            r#"
            [simulation]
            interval_secs = 5
            seed = 42

            [alerts]
            capacity = 20

            [[routes]]
            from = "Chennai"
            to = "Ooty"
            mode = "Bus"
            price = 1200
            "#,
        )
        .unwrap();

        assert_eq!(config.simulation.interval_secs, 5);
        assert_eq!(config.simulation.seed, Some(42));
        assert_eq!(config.simulation.max_delta, 400);
        assert_eq!(config.alerts.capacity, 20);
        assert_eq!(config.routes.len(), 1);
        assert_eq!(config.routes[0].mode, TransportMode::Bus);
        assert_eq!(config.routes[0].target, None);
        assert!(ConfigLoader::validate(&config).is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = PlannerConfig::default();
        config.simulation.interval_secs = 0;
        assert!(ConfigLoader::validate(&config).is_err());

        let mut config = PlannerConfig::default();
        config.simulation.market_update_probability = 1.5;
        assert!(ConfigLoader::validate(&config).is_err());

        let mut config = PlannerConfig::default();
        config.alerts.capacity = 0;
        assert!(ConfigLoader::validate(&config).is_err());
    }

    #[test]
    fn test_malformed_toml() {
        let err = ConfigLoader::parse("[simulation\ninterval_secs = ").unwrap_err();
        assert!(matches!(err, ConfigError::Malformed(_)));
    }

    #[test]
    fn test_missing_file_is_reported() {
        let err = ConfigLoader::load_config(Some(Path::new("/nonexistent/packngo.toml"))).unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::Unreadable { .. })));
    }
}
