//! Option store repository.

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

use straico_core::error::{AppError, ErrorKind};
use straico_core::result::AppResult;
use straico_core::traits::options::KeyValueStore;

/// Persistent options in the host `options` table.
#[derive(Debug, Clone)]
pub struct OptionRepository {
    pool: SqlitePool,
}

impl OptionRepository {
    /// Create a new option repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List every option name, sorted.
    pub async fn list_names(&self) -> AppResult<Vec<String>> {
        sqlx::query_scalar::<_, String>("SELECT name FROM options ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list options", e))
    }
}

#[async_trait]
impl KeyValueStore for OptionRepository {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        sqlx::query_scalar::<_, String>("SELECT value FROM options WHERE name = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, format!("Failed to read option '{key}'"), e)
            })
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO options (name, value) VALUES (?, ?)
             ON CONFLICT(name) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, format!("Failed to write option '{key}'"), e)
        })?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM options WHERE name = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to delete option '{key}'"),
                    e,
                )
            })?;
        let removed = result.rows_affected() > 0;
        debug!(option = key, removed, "Deleted option");
        Ok(removed)
    }
}
