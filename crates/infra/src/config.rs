//! Configuration loader
//!
//! Loads application configuration from environment variables, with
//! sensible defaults for local development. The binary calls
//! `dotenvy::dotenv()` before this runs, so a `.env` file works too.
//!
//! ## Environment Variables
//! - `FLOWTRACK_DB_PATH`: SQLite database file path (default `flowtrack.db`)
//! - `FLOWTRACK_DB_POOL_SIZE`: Connection pool size (default 4)
//! - `FLOWTRACK_BIND_ADDR`: HTTP listen address (default `127.0.0.1:8080`)
//! - `FLOWTRACK_HOLIDAY_API_BASE`: Holiday source base URL
//!   (default `https://brasilapi.com.br`)
//! - `FLOWTRACK_API_TOKEN`: static bearer token; bearer auth is disabled
//!   when unset

use std::net::SocketAddr;
use std::path::PathBuf;

use flowtrack_domain::{FlowtrackError, Result};

/// Runtime configuration for the service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub pool_size: u32,
    pub bind_addr: SocketAddr,
    pub holiday_api_base: String,
    pub api_token: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    /// Returns `FlowtrackError::Config` when a variable is present but
    /// cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let database_path =
            PathBuf::from(env_or("FLOWTRACK_DB_PATH", "flowtrack.db"));

        let pool_size = parse_var("FLOWTRACK_DB_POOL_SIZE", 4u32)?;
        let bind_addr: SocketAddr = env_or("FLOWTRACK_BIND_ADDR", "127.0.0.1:8080")
            .parse()
            .map_err(|err| FlowtrackError::Config(format!("invalid FLOWTRACK_BIND_ADDR: {err}")))?;

        let holiday_api_base = env_or("FLOWTRACK_HOLIDAY_API_BASE", "https://brasilapi.com.br");
        let api_token = std::env::var("FLOWTRACK_API_TOKEN").ok().filter(|t| !t.is_empty());

        Ok(Self { database_path, pool_size, bind_addr, holiday_api_base, api_token })
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).ok().filter(|v| !v.is_empty()).unwrap_or_else(|| default.to_string())
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => value
            .parse()
            .map_err(|_| FlowtrackError::Config(format!("invalid value for {name}: {value:?}"))),
        _ => Ok(default),
    }
}
