//! Configuration file loading.
//!
//! The configuration is a YAML document with a `cosmosdb` section:
//!
//! ```yaml
//! cosmosdb:
//!   url: https://my-account.documents.azure.com:443/
//!   key: <primary key>
//!   database_name: bookings
//!   database_container_name: records
//! ```
//!
//! Every key is required; nothing has a default.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading the configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid YAML or lacks a required key.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A value is present but unusable.
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration document.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub cosmosdb: CosmosDBSettings,
}

/// Cosmos DB connection settings.
#[derive(Clone, Deserialize)]
pub struct CosmosDBSettings {
    /// Account endpoint URL
    pub url: String,
    /// Account master key (base64)
    pub key: String,
    pub database_name: String,
    pub database_container_name: String,
}

impl std::fmt::Debug for CosmosDBSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CosmosDBSettings")
            .field("url", &self.url)
            .field("key", &"***")
            .field("database_name", &self.database_name)
            .field("database_container_name", &self.database_container_name)
            .finish()
    }
}

impl Config {
    /// Load and validate the configuration file at `path`.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse and validate a configuration document.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.cosmosdb.validate()?;
        Ok(config)
    }
}

impl CosmosDBSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("url", &self.url),
            ("key", &self.key),
            ("database_name", &self.database_name),
            ("database_container_name", &self.database_container_name),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("cosmosdb.{name} is empty")));
            }
        }

        let url = url::Url::parse(&self.url)
            .map_err(|e| ConfigError::Invalid(format!("cosmosdb.url '{}': {e}", self.url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "cosmosdb.url '{}' must use http or https",
                self.url
            )));
        }

        Ok(())
    }
}
