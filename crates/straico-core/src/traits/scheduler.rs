//! Job scheduler trait.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::Recurrence;

/// Host scheduler: named recurring jobs ("hooks").
#[async_trait]
pub trait JobScheduler: Send + Sync + std::fmt::Debug + 'static {
    /// Register a recurring instance of `hook`.
    async fn schedule(&self, hook: &str, recurrence: Recurrence) -> AppResult<()>;

    /// Whether at least one instance of `hook` is registered.
    async fn is_scheduled(&self, hook: &str) -> AppResult<bool>;

    /// Remove every instance of `hook`. Returns how many were removed.
    async fn clear(&self, hook: &str) -> AppResult<u64>;
}
