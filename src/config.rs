//! Server configuration.

use std::path::PathBuf;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8000;

/// Default bind host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

/// Runtime configuration for the lookup server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// SQLite file. `None` keeps the store in memory for the life of the process.
    pub database_path: Option<PathBuf>,
    /// Provision the built-in demo identities into an empty store. Off by
    /// default, so a fresh in-memory store starts with no records.
    pub seed_demo: bool,
    /// JSON fixture file provisioned into an empty store.
    pub fixtures_path: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// `host:port` string for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_path: None,
            seed_demo: false,
            fixtures_path: None,
            log_format: LogFormat::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8000);
        assert_eq!(config.host, "0.0.0.0");
        assert!(config.database_path.is_none());
        assert!(!config.seed_demo);
        assert!(config.fixtures_path.is_none());
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.bind_addr(), "0.0.0.0:8000");
    }
}
