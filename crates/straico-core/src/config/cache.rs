//! Transient store configuration.

use serde::{Deserialize, Serialize};

/// Transient store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Provider: `"database"` (persisted in the host database) or `"memory"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// In-memory provider settings.
    #[serde(default)]
    pub memory: MemoryCacheConfig,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            memory: MemoryCacheConfig::default(),
        }
    }
}

/// In-memory transient store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryCacheConfig {
    /// Maximum number of entries held in memory.
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,
}

impl Default for MemoryCacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: default_max_capacity(),
        }
    }
}

fn default_provider() -> String {
    "database".to_string()
}

fn default_max_capacity() -> u64 {
    1000
}
