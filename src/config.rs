//! Client configuration.
//!
//! Configuration can come from:
//! - Config file (`~/.config/wireflow/config.toml`)
//! - Environment variables (`WIREFLOW_*`), which win over the file

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend connection
    #[serde(default)]
    pub api: ApiConfig,

    /// Execution status polling
    #[serde(default)]
    pub poll: PollConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL the REST paths are appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token sent with every request
    #[serde(default)]
    pub token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:3000/api".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollConfig {
    /// Delay between execution status refetches
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
        }
    }
}

fn default_interval_ms() -> u64 {
    2000
}

impl ClientConfig {
    /// Load configuration from the default location, then the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_file_or_default(&Self::config_dir().join("config.toml"))
    }

    /// Like [`ClientConfig::from_file`], but a file that does not exist means
    /// defaults. Any other read or parse failure is returned.
    pub fn from_file_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::from_file(path) {
            Err(ConfigError::Read { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                debug!(path = %path.display(), "no config file, using defaults");
                let mut config = Self::default();
                config.apply_env_overrides();
                Ok(config)
            }
            other => other,
        }
    }

    /// Load configuration from an explicit file, then the environment.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::from_path(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("wireflow"))
            .unwrap_or_else(|| PathBuf::from(".wireflow"))
    }

    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("WIREFLOW_API_URL") {
            self.api.base_url = url;
        }
        if let Ok(token) = std::env::var("WIREFLOW_API_TOKEN") {
            self.api.token = Some(token).filter(|t| !t.is_empty());
        }
        if let Ok(interval) = std::env::var("WIREFLOW_POLL_INTERVAL_MS") {
            if let Ok(parsed) = interval.parse::<u64>() {
                self.poll.interval_ms = parsed;
            }
        }
    }

    pub fn poll_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.poll.interval_ms)
    }
}
