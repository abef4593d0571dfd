//! Client configuration.
//!
//! Supports reading endpoint settings from `~/.config/siraj/config.toml`,
//! with `SIRAJ_API_URL` / `SIRAJ_WS_URL` environment overrides on top.

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use siraj_core::error::{Result, SirajError};

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_WS_URL: &str = "ws://localhost:8000";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Endpoint configuration for both transports.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URL for one-shot HTTP requests.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Base URL for the council WebSocket.
    #[serde(default = "default_ws_url")]
    pub ws_url: String,
    /// Per-request timeout for one-shot calls, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_ws_url() -> String {
    DEFAULT_WS_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            ws_url: default_ws_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ClientConfig {
    /// Loads the configuration with file → environment → default precedence.
    ///
    /// A missing config file is not an error; a present but unreadable or
    /// malformed one is.
    pub fn load() -> Result<Self> {
        let mut config = match config_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Reads the configuration from a specific TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            SirajError::config(format!(
                "Failed to read configuration file at {}: {}",
                path.display(),
                e
            ))
        })?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// The request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = env::var("SIRAJ_API_URL") {
            self.api_url = url;
        }
        if let Ok(url) = env::var("SIRAJ_WS_URL") {
            self.ws_url = url;
        }
    }
}

/// Returns the path to the configuration file: ~/.config/siraj/config.toml
fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("siraj").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_point_at_local_backend() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url, "http://localhost:8000");
        assert_eq!(config.ws_url, "ws://localhost:8000");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn reads_partial_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_url = \"https://siraj.example.edu\"").unwrap();

        let config = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(config.api_url, "https://siraj.example.edu");
        // Unspecified fields keep their defaults.
        assert_eq!(config.ws_url, "ws://localhost:8000");
    }

    #[test]
    fn malformed_config_file_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_url = [not a string").unwrap();

        let err = ClientConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, SirajError::Config(_)));
    }

    #[test]
    fn missing_config_file_is_a_config_error() {
        let err = ClientConfig::from_file(Path::new("/nonexistent/siraj.toml")).unwrap_err();
        assert!(matches!(err, SirajError::Config(_)));
    }
}
