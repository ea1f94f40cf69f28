//! Configuration loading for novusd.
//!
//! The daemon reads an optional TOML file (`--config <path>`); every field
//! has a default so running with no file at all works. Provider credentials
//! deliberately stay out of the file — they are resolved from the
//! environment by [`ProviderSettings::from_env`](crate::config::ProviderSettings::from_env).

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::{GatewayError, Result};

/// Daemon configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
}

/// Server network configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:8787).
    #[serde(default = "default_address")]
    pub address: String,
    /// Provider call timeout in seconds (default: 60).
    #[serde(default = "default_timeout")]
    pub provider_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            provider_timeout_secs: default_timeout(),
        }
    }
}

fn default_address() -> String {
    "127.0.0.1:8787".to_string()
}

fn default_timeout() -> u64 {
    60
}

impl Config {
    /// Load configuration from an explicit path, or defaults when absent.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let Some(path) = explicit_path else {
            return Ok(Self::default());
        };
        let content = fs::read_to_string(path).map_err(|e| {
            GatewayError::Configuration(format!("failed to read config file {path:?}: {e}"))
        })?;
        toml::from_str(&content).map_err(|e| {
            GatewayError::Configuration(format!("failed to parse config file {path:?}: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_path_yields_defaults() {
        let config = Config::load(None).unwrap();
        assert_eq!(config.server.address, "127.0.0.1:8787");
        assert_eq!(config.server.provider_timeout_secs, 60);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\naddress = \"0.0.0.0:9000\"").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.server.address, "0.0.0.0:9000");
        assert_eq!(config.server.provider_timeout_secs, 60);
    }

    #[test]
    fn unreadable_path_is_a_configuration_error() {
        let result = Config::load(Some(Path::new("/nonexistent/config.toml")));
        assert!(matches!(result, Err(GatewayError::Configuration(_))));
    }
}
