use crate::application::services::{
    CapacityPolicy, DEFAULT_OVERFLOW_TEAM_SIZE, DEFAULT_POLL_LIMIT, DEFAULT_QUEUE_MULTIPLIER,
};
use crate::domain::entities::{OfficeHours, DEFAULT_MAX_CONCURRENCY};
use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub service_name: String,
    /// Prometheus exporter port; unset disables the exporter
    pub metrics_port: Option<u16>,
    pub assignment_interval: Duration,
    pub liveness_interval: Duration,
    pub reconciliation_interval: Duration,
    pub queue_multiplier: f64,
    pub nominal_concurrency: u32,
    pub overflow_team_size: u32,
    pub poll_limit: u32,
    pub office_hours: OfficeHours,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://chatdesk.db?mode=rwc".to_string());

        let service_name = env::var("SERVICE_NAME").unwrap_or_else(|_| "chatdesk".to_string());

        let metrics_port = match env::var("METRICS_PORT") {
            Ok(value) => Some(parse_var("METRICS_PORT", &value)?),
            Err(_) => None,
        };

        let assignment_interval =
            Duration::from_secs(var_or("ASSIGNMENT_INTERVAL_SECONDS", 5u64)?);
        let liveness_interval = Duration::from_secs(var_or("LIVENESS_INTERVAL_SECONDS", 1u64)?);
        let reconciliation_interval =
            Duration::from_secs(var_or("RECONCILIATION_INTERVAL_SECONDS", 300u64)?);

        let queue_multiplier = var_or("QUEUE_MULTIPLIER", DEFAULT_QUEUE_MULTIPLIER)?;
        if !(queue_multiplier.is_finite() && queue_multiplier >= 0.0) {
            return Err(ConfigError::Invalid {
                name: "QUEUE_MULTIPLIER",
                value: queue_multiplier.to_string(),
            });
        }

        let nominal_concurrency = var_or("NOMINAL_CONCURRENCY", DEFAULT_MAX_CONCURRENCY)?;
        let overflow_team_size = var_or("OVERFLOW_TEAM_SIZE", DEFAULT_OVERFLOW_TEAM_SIZE)?;
        let poll_limit = var_or("POLL_LIMIT", DEFAULT_POLL_LIMIT)?;

        let office_hours = match env::var("OFFICE_HOURS") {
            Ok(json) => {
                OfficeHours::parse(&json).map_err(|e| ConfigError::OfficeHours(e.to_string()))?
            }
            Err(_) => OfficeHours::weekdays_nine_to_five(),
        };

        Ok(Config {
            database_url,
            service_name,
            metrics_port,
            assignment_interval,
            liveness_interval,
            reconciliation_interval,
            queue_multiplier,
            nominal_concurrency,
            overflow_team_size,
            poll_limit,
            office_hours,
        })
    }

    pub fn capacity_policy(&self) -> CapacityPolicy {
        CapacityPolicy {
            queue_multiplier: self.queue_multiplier,
            nominal_concurrency: self.nominal_concurrency,
            overflow_team_size: self.overflow_team_size,
            ..CapacityPolicy::default()
        }
    }
}

fn var_or<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => parse_var(name, &value),
        Err(_) => Ok(default),
    }
}

fn parse_var<T: FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        value: value.to_string(),
    })
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },

    #[error("Invalid OFFICE_HOURS: {0}")]
    OfficeHours(String),
}
