//! Backend configuration
//!
//! Values come from the process environment, after loading a `.env` file
//! from the working directory if one exists.

use thiserror::Error;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:chessmate.db";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// sqlx connection string, e.g. `sqlite:chessmate.db` or `sqlite::memory:`
    pub database_url: String,
    pub max_connections: u32,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl BackendConfig {
    /// Read `DATABASE_URL` and `CHESSMATE_MAX_CONNECTIONS`
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let database_url = lookup("DATABASE_URL").unwrap_or(defaults.database_url);
        let max_connections = match lookup("CHESSMATE_MAX_CONNECTIONS") {
            None => defaults.max_connections,
            Some(value) => value
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|&n| n > 0)
                .ok_or(ConfigError::InvalidNumber {
                    var: "CHESSMATE_MAX_CONNECTIONS",
                    value,
                })?,
        };

        Ok(Self {
            database_url,
            max_connections,
        })
    }
}
