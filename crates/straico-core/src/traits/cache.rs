//! Transient store trait.

use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;

/// Host transient store: named entries that expire on their own.
#[async_trait]
pub trait EphemeralCache: Send + Sync + std::fmt::Debug + 'static {
    /// Get a value by key. Returns `None` if the key does not exist or has expired.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Set a value that expires after `ttl`. A zero `ttl` never expires.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()>;

    /// Delete a key. Returns `false` when nothing was stored under it.
    async fn delete(&self, key: &str) -> AppResult<bool>;
}
