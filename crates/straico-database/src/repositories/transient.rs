//! Transient store repository.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use straico_core::error::{AppError, ErrorKind};
use straico_core::result::AppResult;
use straico_core::traits::cache::EphemeralCache;

/// Expiring entries in the host `transients` table.
///
/// Expired rows read as absent and are removed on read.
#[derive(Debug, Clone)]
pub struct TransientRepository {
    pool: SqlitePool,
}

impl TransientRepository {
    /// Create a new transient repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Remove every expired transient. Returns how many rows were removed.
    pub async fn purge_expired(&self) -> AppResult<u64> {
        let now = Utc::now().timestamp();
        let result =
            sqlx::query("DELETE FROM transients WHERE expires_at IS NOT NULL AND expires_at <= ?")
                .bind(now)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Cache, "Failed to purge transients", e)
                })?;
        Ok(result.rows_affected())
    }

    /// Unix time at which an entry set now with `ttl` expires.
    ///
    /// `None` means it never expires: a zero `ttl`, or one too large to fit
    /// the expiry column.
    fn expiry_for(ttl: Duration) -> Option<i64> {
        if ttl.is_zero() {
            return None;
        }
        let secs = i64::try_from(ttl.as_secs().max(1)).ok()?;
        Utc::now().timestamp().checked_add(secs)
    }

    async fn remove(&self, key: &str) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM transients WHERE name = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Cache,
                    format!("Failed to delete transient '{key}'"),
                    e,
                )
            })?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl EphemeralCache for TransientRepository {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let row = sqlx::query_as::<_, (String, Option<i64>)>(
            "SELECT value, expires_at FROM transients WHERE name = ?",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Cache, format!("Failed to read transient '{key}'"), e)
        })?;

        match row {
            Some((_, Some(expires_at))) if expires_at <= Utc::now().timestamp() => {
                self.remove(key).await?;
                Ok(None)
            }
            Some((value, _)) => Ok(Some(value)),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        let expires_at = Self::expiry_for(ttl);
        if expires_at.is_none() && !ttl.is_zero() {
            debug!(
                transient = key,
                ttl_secs = ttl.as_secs(),
                "TTL out of range, storing without expiry"
            );
        }

        sqlx::query(
            "INSERT INTO transients (name, value, expires_at) VALUES (?, ?, ?)
             ON CONFLICT(name) DO UPDATE SET value = excluded.value, expires_at = excluded.expires_at",
        )
        .bind(key)
        .bind(value)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Cache, format!("Failed to write transient '{key}'"), e)
        })?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<bool> {
        let removed = self.remove(key).await? > 0;
        debug!(transient = key, removed, "Deleted transient");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::DatabasePool;
    use crate::migration::bootstrap_host_schema;

    async fn make_repo() -> TransientRepository {
        let db = DatabasePool::connect_in_memory().await.unwrap();
        bootstrap_host_schema(db.pool()).await.unwrap();
        TransientRepository::new(db.into_pool())
    }

    async fn insert_expired(repo: &TransientRepository, key: &str) {
        sqlx::query("INSERT INTO transients (name, value, expires_at) VALUES (?, 'old', ?)")
            .bind(key)
            .bind(Utc::now().timestamp() - 10)
            .execute(&repo.pool)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_set_get_delete() {
        let repo = make_repo().await;
        repo.set("straico_previous_models", "[\"gpt\"]", Duration::from_secs(3600))
            .await
            .unwrap();
        assert_eq!(
            repo.get("straico_previous_models").await.unwrap(),
            Some("[\"gpt\"]".to_string())
        );
        assert!(repo.delete("straico_previous_models").await.unwrap());
        assert!(!repo.delete("straico_previous_models").await.unwrap());
    }

    #[tokio::test]
    async fn test_expired_entry_reads_as_absent() {
        let repo = make_repo().await;
        insert_expired(&repo, "straico_last_balance_notification").await;

        assert_eq!(
            repo.get("straico_last_balance_notification").await.unwrap(),
            None
        );
        assert!(!repo.delete("straico_last_balance_notification").await.unwrap());
    }

    #[tokio::test]
    async fn test_zero_ttl_never_expires() {
        let repo = make_repo().await;
        repo.set("pinned", "v", Duration::ZERO).await.unwrap();
        insert_expired(&repo, "stale").await;

        assert_eq!(repo.purge_expired().await.unwrap(), 1);
        assert_eq!(repo.get("pinned").await.unwrap(), Some("v".to_string()));
    }

    #[tokio::test]
    async fn test_oversized_ttl_never_expires() {
        let repo = make_repo().await;
        for ttl in [Duration::from_secs(i64::MAX as u64), Duration::MAX] {
            repo.set("straico_previous_models", "[]", ttl).await.unwrap();

            let expires_at: Option<i64> =
                sqlx::query_scalar("SELECT expires_at FROM transients WHERE name = ?")
                    .bind("straico_previous_models")
                    .fetch_one(&repo.pool)
                    .await
                    .unwrap();
            assert_eq!(expires_at, None);
            assert_eq!(
                repo.get("straico_previous_models").await.unwrap(),
                Some("[]".to_string())
            );
        }
    }

    #[test]
    fn test_expiry_for_regular_ttl() {
        let before = Utc::now().timestamp();
        let expires_at = TransientRepository::expiry_for(Duration::from_secs(60)).unwrap();
        assert!(expires_at >= before + 60 && expires_at <= Utc::now().timestamp() + 60);
        assert_eq!(
            TransientRepository::expiry_for(Duration::from_millis(10)).map(|t| t > before),
            Some(true)
        );
    }
}
