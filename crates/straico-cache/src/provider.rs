//! Transient store manager that dispatches to the configured provider.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use straico_core::config::cache::CacheConfig;
use straico_core::error::AppError;
use straico_core::result::AppResult;
use straico_core::traits::cache::EphemeralCache;

/// Transient store manager that wraps the configured provider.
#[derive(Debug, Clone)]
pub struct CacheManager {
    /// The inner transient store.
    inner: Arc<dyn EphemeralCache>,
}

impl CacheManager {
    /// Create a cache manager from configuration.
    ///
    /// `persistent` is the host's database-backed store, used when the
    /// provider is `"database"`.
    pub fn new(config: &CacheConfig, persistent: Arc<dyn EphemeralCache>) -> AppResult<Self> {
        let inner: Arc<dyn EphemeralCache> = match config.provider.as_str() {
            "database" => {
                info!("Using database transient store");
                persistent
            }
            #[cfg(feature = "memory")]
            "memory" => {
                info!("Initializing in-memory transient store");
                Arc::new(crate::memory::MemoryTransientStore::new(&config.memory))
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown cache provider: '{other}'. Supported: database, memory"
                )));
            }
        };

        Ok(Self { inner })
    }
}

#[async_trait]
impl EphemeralCache for CacheManager {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        self.inner.set(key, value, ttl).await
    }

    async fn delete(&self, key: &str) -> AppResult<bool> {
        self.inner.delete(key).await
    }
}
