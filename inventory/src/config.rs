//! Configuration management for the inventory server.
//!
//! Loads configuration from environment variables with sensible defaults.
//! A database path given as the first command-line argument wins over the
//! environment.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Database URL value selecting the in-memory repository.
pub const MEMORY_DATABASE: &str = "memory";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Database configuration
    pub database: DatabaseConfig,
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Directory served under `/js/`
    pub assets_dir: PathBuf,
}

/// Database configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL, or `memory`
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
}

impl Config {
    /// Load configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from `lookup`, which maps variable names to values.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            database: DatabaseConfig {
                url: lookup("INVENTORY_DATABASE_URL")
                    .unwrap_or_else(|| "sqlite://inventory.db?mode=rwc".to_string()),
                max_connections: lookup("INVENTORY_DATABASE_MAX_CONNECTIONS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
            },
            server: ServerConfig {
                host: lookup("INVENTORY_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: lookup("INVENTORY_PORT")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5080),
            },
            assets_dir: lookup("INVENTORY_ASSETS_DIR")
                .map_or_else(|| PathBuf::from("inventory/js"), PathBuf::from),
        }
    }

    /// Apply command-line arguments (without the program name).
    ///
    /// The first argument is a database file path, or `memory`.
    #[must_use]
    pub fn with_args(mut self, args: impl IntoIterator<Item = String>) -> Self {
        if let Some(path) = args.into_iter().next() {
            self.database.url = if path == MEMORY_DATABASE || path.starts_with("sqlite:") {
                path
            } else {
                format!("sqlite://{path}?mode=rwc")
            };
        }
        self
    }

    /// Returns `true` when parts are kept in memory only.
    #[must_use]
    pub fn uses_memory_database(&self) -> bool {
        self.database.url == MEMORY_DATABASE
    }

    /// Address to bind the HTTP listener to.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.database.url, "sqlite://inventory.db?mode=rwc");
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.bind_address(), "0.0.0.0:5080");
        assert_eq!(config.assets_dir, PathBuf::from("inventory/js"));
        assert!(!config.uses_memory_database());
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("INVENTORY_HOST", "127.0.0.1"),
            ("INVENTORY_PORT", "8080"),
            ("INVENTORY_DATABASE_URL", "memory"),
            ("INVENTORY_ASSETS_DIR", "/srv/js"),
        ]));
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert!(config.uses_memory_database());
        assert_eq!(config.assets_dir, PathBuf::from("/srv/js"));
    }

    #[test]
    fn unparsable_numbers_fall_back() {
        let config = Config::from_lookup(lookup(&[
            ("INVENTORY_PORT", "http"),
            ("INVENTORY_DATABASE_MAX_CONNECTIONS", "-1"),
        ]));
        assert_eq!(config.server.port, 5080);
        assert_eq!(config.database.max_connections, 5);
    }

    #[test]
    fn first_argument_is_database_path() {
        let config = Config::default().with_args(vec!["parts.db".to_string(), "extra".to_string()]);
        assert_eq!(config.database.url, "sqlite://parts.db?mode=rwc");

        let config = Config::default().with_args(vec!["memory".to_string()]);
        assert!(config.uses_memory_database());

        let config = Config::default().with_args(Vec::new());
        assert_eq!(config, Config::default());
    }
}
