use std::env;
use std::time::Duration;

use crate::domain::entities::TrackedMonths;
use crate::error::ConfigError;

const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
const DEFAULT_GITHUB_TIMEOUT_SECS: u64 = 10;
const DEFAULT_QUEUE_CAPACITY: usize = 256;
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Base URL of the GitHub REST API
    pub github_api_url: String,
    /// Personal access token; unauthenticated search has a much lower rate limit
    pub github_token: Option<String>,
    pub github_timeout: Duration,
    /// Months counted by the leaderboard and dashboard
    pub tracked_months: TrackedMonths,
    pub ingestion_queue_capacity: usize,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the config from any variable source
    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let database_url = var("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let github_api_url = var("GITHUB_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string());

        let github_timeout = match var("GITHUB_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(0) => {
                    return Err(ConfigError::Invalid {
                        name: "GITHUB_TIMEOUT_SECS",
                        reason: "must be greater than zero".to_string(),
                    })
                }
                Ok(secs) => Duration::from_secs(secs),
                Err(e) => {
                    return Err(ConfigError::Invalid {
                        name: "GITHUB_TIMEOUT_SECS",
                        reason: e.to_string(),
                    })
                }
            },
            None => Duration::from_secs(DEFAULT_GITHUB_TIMEOUT_SECS),
        };

        let tracked_months = match var("TRACKED_MONTHS") {
            Some(raw) => TrackedMonths::parse(&raw).map_err(|e| ConfigError::Invalid {
                name: "TRACKED_MONTHS",
                reason: e.to_string(),
            })?,
            None => TrackedMonths::default(),
        };

        let ingestion_queue_capacity = parse_or(
            var("INGESTION_QUEUE_CAPACITY"),
            "INGESTION_QUEUE_CAPACITY",
            DEFAULT_QUEUE_CAPACITY,
        )?;
        if ingestion_queue_capacity == 0 {
            return Err(ConfigError::Invalid {
                name: "INGESTION_QUEUE_CAPACITY",
                reason: "must be greater than zero".to_string(),
            });
        }

        let port = parse_or(var("PORT"), "PORT", DEFAULT_PORT)?;

        Ok(Self {
            database_url,
            github_api_url,
            github_token: var("GITHUB_TOKEN"),
            github_timeout,
            tracked_months,
            ingestion_queue_capacity,
            port,
        })
    }
}

fn parse_or<T>(raw: Option<String>, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}
