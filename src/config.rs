//! Service configuration read from the environment (after `.env` is loaded).

use std::time::Duration;

use thiserror::Error;

use crate::infrastructure::retry::RetryPolicy;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Reads:
/// - `DATABASE_URL` (required)
/// - `HOST` (default `0.0.0.0`), `PORT` (default `8080`)
/// - `CATALOG_SERVICE_URI` (default `http://localhost:9001`)
/// - `CATALOG_TIMEOUT_MS` (3000), `CATALOG_MAX_RETRIES` (3),
///   `CATALOG_INITIAL_BACKOFF_MS` (100)
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub catalog_service_uri: String,
    pub catalog_retry: RetryPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = RetryPolicy::default();

        Ok(Self {
            database_url: lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 8080)?,
            catalog_service_uri: lookup("CATALOG_SERVICE_URI")
                .unwrap_or_else(|| "http://localhost:9001".to_string()),
            catalog_retry: RetryPolicy {
                max_retries: parse_or(&lookup, "CATALOG_MAX_RETRIES", defaults.max_retries)?,
                initial_backoff: Duration::from_millis(parse_or(
                    &lookup,
                    "CATALOG_INITIAL_BACKOFF_MS",
                    defaults.initial_backoff.as_millis() as u64,
                )?),
                attempt_timeout: Duration::from_millis(parse_or(
                    &lookup,
                    "CATALOG_TIMEOUT_MS",
                    defaults.attempt_timeout.as_millis() as u64,
                )?),
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}
