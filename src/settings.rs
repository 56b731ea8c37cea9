//! Runtime settings from environment variables (a `.env` file is honored).

use crate::error::ConfigError;
use std::str::FromStr;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// Postgres connection string. Unset means the in-memory store.
    pub database_url: Option<String>,
    pub bind_addr: String,
    pub max_connections: u32,
    /// Largest accepted request body, in bytes.
    pub body_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database_url: None,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

fn parse_var<T: FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw.filter(|s| !s.trim().is_empty()) {
        None => Ok(default),
        Some(s) => s.trim().parse().map_err(|_| ConfigError::Invalid { key, value: s }),
    }
}

impl AppConfig {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_vars<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(AppConfig {
            database_url: get("DATABASE_URL").filter(|s| !s.trim().is_empty()),
            bind_addr: get("BIND_ADDR")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            max_connections: parse_var("DB_MAX_CONNECTIONS", get("DB_MAX_CONNECTIONS"), DEFAULT_MAX_CONNECTIONS)?,
            body_limit: parse_var("BODY_LIMIT_BYTES", get("BODY_LIMIT_BYTES"), DEFAULT_BODY_LIMIT)?,
        })
    }
}
