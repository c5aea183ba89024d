//! Schema manager trait.

use async_trait::async_trait;

use crate::result::AppResult;

/// Owner of the plugin's table set.
#[async_trait]
pub trait SchemaManager: Send + Sync + std::fmt::Debug + 'static {
    /// Names of the tables this manager creates.
    fn tables(&self) -> Vec<String>;

    /// Create the plugin tables. Called once per activation.
    async fn install(&self) -> AppResult<()>;

    /// Drop the plugin tables and return how many existed.
    /// Missing tables are not an error.
    async fn uninstall(&self) -> AppResult<u64>;
}
