//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `AHP_ENGINE` prefix and nested values use double underscores as separators.
//! Every value has a default, so an empty environment yields a usable configuration.
//!
//! # Example
//!
//! ```no_run
//! use ahp_engine::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Hierarchies stored in {}", config.storage.data_dir.display());
//! ```

mod consistency;
mod error;
mod hierarchy;
mod logging;
mod storage;

pub use consistency::ConsistencyConfig;
pub use error::{ConfigError, ValidationError};
pub use hierarchy::HierarchyConfig;
pub use logging::LoggingConfig;
pub use storage::{StorageConfig, StorageFormat};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Consistency thresholds and random index policy
    #[serde(default)]
    pub consistency: ConsistencyConfig,

    /// Criteria and alternative count bounds
    #[serde(default)]
    pub hierarchy: HierarchyConfig,

    /// Hierarchy file storage
    #[serde(default)]
    pub storage: StorageConfig,

    /// Tracing output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `AHP_ENGINE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `AHP_ENGINE__CONSISTENCY__ACCEPTABLE_THRESHOLD=0.15` -> `consistency.acceptable_threshold = 0.15`
    /// - `AHP_ENGINE__STORAGE__FORMAT=json` -> `storage.format = json`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("AHP_ENGINE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.consistency.validate()?;
        self.hierarchy.validate()?;
        self.storage.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
