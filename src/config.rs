use crate::domain::ScoringPeriod;
use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Directory holding the JSON feed snapshots.
    pub feed_dir: PathBuf,
    /// Period served when a request does not name one.
    pub default_period: ScoringPeriod,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8080")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let feed_dir = env_map
            .get("FEED_DIR")
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .ok_or_else(|| ConfigError::MissingEnv("FEED_DIR".to_string()))?;

        let default_period = env_map
            .get("DEFAULT_PERIOD")
            .map(|s| s.as_str())
            .unwrap_or("total");
        let default_period = ScoringPeriod::from_str(default_period).map_err(|_| {
            ConfigError::InvalidValue(
                "DEFAULT_PERIOD".to_string(),
                format!("must be day, week, month, or total, got {}", default_period),
            )
        })?;

        Ok(Config {
            port,
            feed_dir,
            default_period,
        })
    }
}
