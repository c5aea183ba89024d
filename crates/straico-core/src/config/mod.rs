//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! an optional TOML file plus `STRAICO__`-prefixed environment variables.
//! Every field carries a default, so an empty configuration is valid.

pub mod cache;
pub mod database;
pub mod logging;
pub mod plugin;
pub mod scheduler;
pub mod storage;

use serde::{Deserialize, Serialize};

use self::cache::CacheConfig;
use self::database::DatabaseConfig;
use self::logging::LoggingConfig;
use self::plugin::PluginConfig;
use self::scheduler::SchedulerConfig;
use self::storage::StorageConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Host database settings (options, transients, cron events, plugin tables).
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Transient store settings.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Upload area settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Recurring job runtime settings.
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    /// Plugin identity.
    #[serde(default)]
    pub plugin: PluginConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file (optional) and the environment.
    ///
    /// Environment variables use the `STRAICO` prefix and `__` as the section
    /// separator, e.g. `STRAICO__STORAGE__UPLOAD_ROOT=/var/www/uploads`.
    pub fn load(path: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("STRAICO")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}
