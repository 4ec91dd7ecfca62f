//! Configuration management with validation and defaults
//!
//! Sources, lowest precedence first: built-in defaults, an optional TOML file,
//! `FAIRDICE_*` environment variables.

use crate::errors::ConfigurationError;
use crate::games::Seeds;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Complete service configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub fairness: Seeds,
}

/// HTTP listener settings
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4000,
            allowed_origins: vec!["*".to_string()],
            request_timeout_secs: 30,
        }
    }
}

/// Where the game state lives
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    pub data_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("./data.json"),
        }
    }
}

/// Configuration loader with environment variable support
#[derive(Debug, Default)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration file path
    pub fn with_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Load configuration from file and environment variables
    pub fn load(&self) -> Result<AppConfig, ConfigurationError> {
        let mut config = match &self.config_path {
            Some(path) => Self::load_from_file(path)?,
            None => AppConfig::default(),
        };

        Self::apply_overrides(&mut config, |key| env::var(key).ok())?;
        Self::validate(&config)?;

        Ok(config)
    }

    fn load_from_file(path: &Path) -> Result<AppConfig, ConfigurationError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigurationError::LoadFailed(format!("Failed to read {}: {}", path.display(), e))
        })?;

        toml::from_str(&content)
            .map_err(|e| ConfigurationError::LoadFailed(format!("Failed to parse TOML: {}", e)))
    }

    /// Apply `FAIRDICE_*` overrides; `lookup` abstracts the environment for tests
    fn apply_overrides<F>(config: &mut AppConfig, lookup: F) -> Result<(), ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("FAIRDICE_HOST") {
            config.server.host = host;
        }
        if let Some(port) = lookup("FAIRDICE_PORT") {
            config.server.port = port.parse().map_err(|_| ConfigurationError::InvalidValue {
                field: "FAIRDICE_PORT".to_string(),
                value: port.clone(),
                reason: "Invalid port number".to_string(),
            })?;
        }
        if let Some(timeout) = lookup("FAIRDICE_REQUEST_TIMEOUT_SECS") {
            config.server.request_timeout_secs =
                timeout.parse().map_err(|_| ConfigurationError::InvalidValue {
                    field: "FAIRDICE_REQUEST_TIMEOUT_SECS".to_string(),
                    value: timeout.clone(),
                    reason: "Expected whole seconds".to_string(),
                })?;
        }
        if let Some(file) = lookup("FAIRDICE_DATA_FILE") {
            config.storage.data_file = PathBuf::from(file);
        }
        if let Some(seed) = lookup("FAIRDICE_SERVER_SEED") {
            config.fairness.server_seed = seed;
        }
        if let Some(seed) = lookup("FAIRDICE_CLIENT_SEED") {
            config.fairness.client_seed = seed;
        }
        Ok(())
    }

    pub fn validate(config: &AppConfig) -> Result<(), ConfigurationError> {
        if config.server.host.parse::<std::net::IpAddr>().is_err() {
            return Err(ConfigurationError::InvalidValue {
                field: "server.host".to_string(),
                value: config.server.host.clone(),
                reason: "Expected an IP address".to_string(),
            });
        }
        if config.server.request_timeout_secs == 0 {
            return Err(ConfigurationError::ValidationFailed(
                "server.request_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if config.storage.data_file.as_os_str().is_empty() {
            return Err(ConfigurationError::ValidationFailed(
                "storage.data_file must not be empty".to_string(),
            ));
        }
        if config.fairness.server_seed.is_empty() || config.fairness.client_seed.is_empty() {
            return Err(ConfigurationError::ValidationFailed(
                "fairness seeds must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
