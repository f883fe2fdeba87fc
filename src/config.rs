//! Application configuration.
//!
//! Loaded from optional YAML files and `PURCHASE_ORDERS__*` environment variables, with
//! every key falling back to a default.

use serde::Deserialize;
use std::path::PathBuf;

/// Configuration file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "purchase-orders.yaml";
/// Environment variable naming an additional configuration file.
pub const CONFIG_ENV_VAR: &str = "PURCHASE_ORDERS_CONFIG";
/// Prefix for configuration environment variables, e.g. `PURCHASE_ORDERS__STORE__PATH`.
pub const CONFIG_ENV_PREFIX: &str = "PURCHASE_ORDERS";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("store.buffer_size must be at least 1")]
    ZeroBufferSize,
}

/// Which [`Storage`](crate::storage::Storage) backend the order store uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    File,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// JSON file holding the collection. Ignored by the memory backend.
    pub path: PathBuf,
    /// Request channel capacity of the store actor.
    pub buffer_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::File,
            path: PathBuf::from("purchase_orders.json"),
            buffer_size: 32,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
}

impl Config {
    /// Load configuration from file and environment.
    ///
    /// Sources, later overriding earlier:
    /// 1. `purchase-orders.yaml` in the current directory (if exists)
    /// 2. File given by `path` (must exist)
    /// 3. File named by `PURCHASE_ORDERS_CONFIG` (must exist)
    /// 4. `PURCHASE_ORDERS__*` environment variables
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        use ::config::{Config as ConfigLib, Environment, File, FileFormat};

        let mut builder = ConfigLib::builder()
            .add_source(File::new(DEFAULT_CONFIG_FILE, FileFormat::Yaml).required(false));

        if let Some(config_path) = path {
            builder = builder.add_source(File::new(config_path, FileFormat::Yaml).required(true));
        }

        if let Ok(config_path) = std::env::var(CONFIG_ENV_VAR) {
            builder = builder.add_source(File::new(&config_path, FileFormat::Yaml).required(true));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = config.try_deserialize()?;
        if config.store.buffer_size == 0 {
            return Err(ConfigError::ZeroBufferSize);
        }
        Ok(config)
    }

    /// Points the store at `path`, switching to the file backend.
    pub fn with_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store.backend = StoreBackend::File;
        self.store.path = path.into();
        self
    }
}
