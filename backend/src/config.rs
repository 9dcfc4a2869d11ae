//! # Application Configuration
//!
//! Settings are resolved in three layers, later ones winning:
//!
//! 1. built-in defaults
//! 2. an optional YAML file named by `EXPENSE_CALENDAR_CONFIG`
//! 3. `EXPENSE_CALENDAR_DATABASE_URL` / `EXPENSE_CALENDAR_BIND_ADDRESS`
//!
//! ## YAML Format
//!
//! ```yaml
//! database_url: "sqlite:expense_calendar.db"
//! bind_address: "127.0.0.1:3000"
//! cors_origin: "http://localhost:8080"
//! log_filter: "info"
//! max_connections: 5
//! ```
//!
//! Every key is optional.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use tracing::info;

pub const CONFIG_PATH_VAR: &str = "EXPENSE_CALENDAR_CONFIG";
pub const DATABASE_URL_VAR: &str = "EXPENSE_CALENDAR_DATABASE_URL";
pub const BIND_ADDRESS_VAR: &str = "EXPENSE_CALENDAR_BIND_ADDRESS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// sqlx SQLite url; the file is created if missing
    pub database_url: String,
    pub bind_address: String,
    /// Origin allowed to call the API from a browser
    pub cors_origin: String,
    /// Fallback tracing filter when `RUST_LOG` is unset
    pub log_filter: String,
    pub max_connections: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:expense_calendar.db".to_string(),
            bind_address: "127.0.0.1:3000".to_string(),
            cors_origin: "http://localhost:8080".to_string(),
            log_filter: "info".to_string(),
            max_connections: 5,
        }
    }
}

impl AppConfig {
    /// Resolve the configuration from the process environment
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Read a YAML config file; missing keys keep their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: AppConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;

        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Apply environment overrides looked up through `lookup`
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(DATABASE_URL_VAR) {
            self.database_url = url;
        }
        if let Some(address) = lookup(BIND_ADDRESS_VAR) {
            self.bind_address = address;
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.bind_address
            .parse()
            .with_context(|| format!("invalid bind address '{}'", self.bind_address))
    }
}
