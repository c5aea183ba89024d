//! Option store trait.

use async_trait::async_trait;

use crate::result::AppResult;

/// Host option store: persistent named settings.
#[async_trait]
pub trait KeyValueStore: Send + Sync + std::fmt::Debug + 'static {
    /// Get an option value.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Create or overwrite an option.
    async fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Delete an option. Returns `false` when the option did not exist.
    async fn delete(&self, key: &str) -> AppResult<bool>;
}
