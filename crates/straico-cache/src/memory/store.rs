//! In-memory transient store implementation using the moka crate.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use tracing::debug;

use straico_core::config::cache::MemoryCacheConfig;
use straico_core::result::AppResult;
use straico_core::traits::cache::EphemeralCache;

/// Longer TTLs are stored without expiry.
const MAX_TTL: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// A cached value with the TTL it was stored with.
#[derive(Debug, Clone)]
struct TransientEntry {
    value: String,
    ttl: Option<Duration>,
}

/// Per-entry expiry: each entry lives for the TTL given at `set`.
struct TransientExpiry;

impl Expiry<String, TransientEntry> for TransientExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &TransientEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        value.ttl
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &TransientEntry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        value.ttl
    }
}

/// In-memory transient store using moka.
#[derive(Debug, Clone)]
pub struct MemoryTransientStore {
    /// The underlying moka cache.
    cache: Cache<String, TransientEntry>,
}

impl MemoryTransientStore {
    /// Create a new in-memory store from configuration.
    pub fn new(config: &MemoryCacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .expire_after(TransientExpiry)
            .build();

        Self { cache }
    }
}

#[async_trait]
impl EphemeralCache for MemoryTransientStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.cache.get(key).await.map(|entry| entry.value))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        let entry = TransientEntry {
            value: value.to_string(),
            ttl: (!ttl.is_zero() && ttl <= MAX_TTL).then_some(ttl),
        };
        self.cache.insert(key.to_string(), entry).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<bool> {
        let removed = self.cache.remove(key).await.is_some();
        debug!(transient = key, removed, "Deleted transient");
        Ok(removed)
    }
}
