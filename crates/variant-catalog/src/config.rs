//! Catalog configuration.
//!
//! Read from a TOML file, or JSON when the path ends in `.json`. Every field has a default,
//! so an empty file (or no file at all) gives a working setup:
//!
//! ```toml
//! [store]
//! buffer_size = 32
//!
//! [inventory]
//! stock_formulation = "template-minimum"
//! low_stock_threshold = 10
//! deletion_policy = "cascade"
//!
//! [logging]
//! filter = "info"
//! ```

use crate::inventory::StockFormulation;
use crate::store::{CatalogSettings, DeletionPolicy, DEFAULT_BUFFER_SIZE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse TOML config {path}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to parse JSON config {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub inventory: InventoryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Request channel capacity of the store task.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            buffer_size: default_buffer_size(),
        }
    }
}

fn default_buffer_size() -> usize {
    DEFAULT_BUFFER_SIZE
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryConfig {
    #[serde(default)]
    pub stock_formulation: StockFormulation,
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: u32,
    #[serde(default)]
    pub deletion_policy: DeletionPolicy,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            stock_formulation: StockFormulation::default(),
            low_stock_threshold: default_low_stock_threshold(),
            deletion_policy: DeletionPolicy::default(),
        }
    }
}

fn default_low_stock_threshold() -> u32 {
    CatalogSettings::default().low_stock_threshold
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

fn default_filter() -> String {
    "info".to_string()
}

impl CatalogConfig {
    /// Load config from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = if is_json(path) {
            Self::from_json(&content).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            Self::from_toml(&content).map_err(|source| ConfigError::Toml {
                path: path.to_path_buf(),
                source,
            })?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.buffer_size == 0 {
            return Err(ConfigError::Invalid(
                "store.buffer_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// The reducer context built from this config.
    pub fn settings(&self) -> CatalogSettings {
        CatalogSettings {
            deletion_policy: self.inventory.deletion_policy,
            stock_formulation: self.inventory.stock_formulation,
            low_stock_threshold: self.inventory.low_stock_threshold,
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
