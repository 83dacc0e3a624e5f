//! Application configuration loaded from environment variables.

use crate::models::pace::DEFAULT_PACE_UNIT_METERS;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// GCP project ID (Firestore)
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,

    // --- Aggregation ---
    /// Distance basis for pace, in meters
    pub pace_unit_meters: f64,
    /// Maximum interval fetches in flight per aggregation
    pub interval_fetch_concurrency: usize,
    /// Timeout applied to each store call made by the aggregator
    pub store_timeout: Duration,
    /// Report "user has no activities" as 404 instead of an empty 200
    pub empty_activities_not_found: bool,
}

impl Config {
    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 8080,
            pace_unit_meters: DEFAULT_PACE_UNIT_METERS,
            interval_fetch_concurrency: 4,
            store_timeout: Duration::from_secs(5),
            empty_activities_not_found: false,
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let pace_unit_meters: f64 = parse_var("PACE_UNIT_METERS", DEFAULT_PACE_UNIT_METERS)?;
        if !(pace_unit_meters > 0.0 && pace_unit_meters.is_finite()) {
            return Err(ConfigError::Invalid("PACE_UNIT_METERS", "must be positive"));
        }

        let interval_fetch_concurrency: usize = parse_var("INTERVAL_FETCH_CONCURRENCY", 8)?;
        if interval_fetch_concurrency == 0 {
            return Err(ConfigError::Invalid(
                "INTERVAL_FETCH_CONCURRENCY",
                "must be at least 1",
            ));
        }

        let store_timeout_secs: u64 = parse_var("STORE_TIMEOUT_SECS", 10)?;
        if store_timeout_secs == 0 {
            return Err(ConfigError::Invalid("STORE_TIMEOUT_SECS", "must be at least 1"));
        }

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port: parse_var("PORT", 8080)?,
            pace_unit_meters,
            interval_fetch_concurrency,
            store_timeout: Duration::from_secs(store_timeout_secs),
            empty_activities_not_found: parse_var("EMPTY_ACTIVITIES_NOT_FOUND", false)?,
        })
    }
}

/// Read an optional variable, falling back to `default` when unset.
fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(name, "could not be parsed")),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1}")]
    Invalid(&'static str, &'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test so the process-wide environment is not mutated concurrently.
    #[test]
    fn test_config_from_env() {
        env::remove_var("PACE_UNIT_METERS");
        env::remove_var("INTERVAL_FETCH_CONCURRENCY");
        env::remove_var("EMPTY_ACTIVITIES_NOT_FOUND");
        env::set_var("STORE_TIMEOUT_SECS", "3");

        let config = Config::from_env().expect("Config should load");
        assert_eq!(config.pace_unit_meters, 100.0);
        assert_eq!(config.interval_fetch_concurrency, 8);
        assert_eq!(config.store_timeout, Duration::from_secs(3));
        assert!(!config.empty_activities_not_found);

        env::set_var("EMPTY_ACTIVITIES_NOT_FOUND", "true");
        env::set_var("PACE_UNIT_METERS", "50");
        let config = Config::from_env().expect("Config should load");
        assert!(config.empty_activities_not_found);
        assert_eq!(config.pace_unit_meters, 50.0);

        env::set_var("PACE_UNIT_METERS", "0");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid("PACE_UNIT_METERS", _))
        ));

        env::set_var("PACE_UNIT_METERS", "fast");
        assert!(Config::from_env().is_err());

        env::remove_var("PACE_UNIT_METERS");
        env::set_var("INTERVAL_FETCH_CONCURRENCY", "0");
        assert!(Config::from_env().is_err());

        env::remove_var("INTERVAL_FETCH_CONCURRENCY");
        env::remove_var("EMPTY_ACTIVITIES_NOT_FOUND");
        env::remove_var("STORE_TIMEOUT_SECS");
    }
}
