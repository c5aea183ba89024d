//! Persisted cron event registrations.

use async_trait::async_trait;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{debug, warn};

use straico_core::error::{AppError, ErrorKind};
use straico_core::result::AppResult;
use straico_core::traits::scheduler::JobScheduler;
use straico_core::types::Recurrence;

/// A registered recurring event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CronEvent {
    /// Hook name the event fires.
    pub hook: String,
    /// Repeat interval.
    pub recurrence: Recurrence,
}

#[derive(Debug, sqlx::FromRow)]
struct CronEventRow {
    hook: String,
    interval_seconds: i64,
}

impl CronEventRow {
    fn into_event(self) -> AppResult<CronEvent> {
        let recurrence = Recurrence::from_interval_secs(self.interval_seconds.max(0) as u64)?;
        Ok(CronEvent {
            hook: self.hook,
            recurrence,
        })
    }
}

/// Host scheduler registrations in the `cron_events` table.
///
/// This is the persisted side of scheduling; [`JobScheduler`] calls made
/// here survive restarts and are what uninstall clears.
#[derive(Debug, Clone)]
pub struct CronEventRepository {
    pool: SqlitePool,
}

impl CronEventRepository {
    /// Create a new cron event repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List every registered event ordered by hook name.
    pub async fn list(&self) -> AppResult<Vec<CronEvent>> {
        let rows = sqlx::query_as::<_, CronEventRow>(
            "SELECT hook, interval_seconds FROM cron_events ORDER BY hook, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list cron events", e))?;

        let mut events = Vec::with_capacity(rows.len());
        for row in rows {
            let hook = row.hook.clone();
            match row.into_event() {
                Ok(event) => events.push(event),
                Err(e) => warn!(hook = %hook, error = %e, "Skipping unreadable cron event"),
            }
        }
        Ok(events)
    }
}

#[async_trait]
impl JobScheduler for CronEventRepository {
    async fn schedule(&self, hook: &str, recurrence: Recurrence) -> AppResult<()> {
        let interval = recurrence.interval().as_secs() as i64;

        sqlx::query("INSERT INTO cron_events (hook, interval_seconds) VALUES (?, ?)")
            .bind(hook)
            .bind(interval)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Scheduler,
                    format!("Failed to schedule '{hook}'"),
                    e,
                )
            })?;

        debug!(hook, %recurrence, "Scheduled cron event");
        Ok(())
    }

    async fn is_scheduled(&self, hook: &str) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cron_events WHERE hook = ?")
            .bind(hook)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Scheduler,
                    format!("Failed to look up '{hook}'"),
                    e,
                )
            })?;
        Ok(count > 0)
    }

    async fn clear(&self, hook: &str) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM cron_events WHERE hook = ?")
            .bind(hook)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Scheduler, format!("Failed to clear '{hook}'"), e)
            })?;
        let cleared = result.rows_affected();
        debug!(hook, cleared, "Cleared cron event");
        Ok(cleared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::DatabasePool;
    use crate::migration::bootstrap_host_schema;

    async fn make_repo() -> CronEventRepository {
        let db = DatabasePool::connect_in_memory().await.unwrap();
        bootstrap_host_schema(db.pool()).await.unwrap();
        CronEventRepository::new(db.into_pool())
    }

    #[tokio::test]
    async fn test_schedule_and_clear_all_instances() {
        let repo = make_repo().await;
        repo.schedule("straico_model_update_event", Recurrence::Daily)
            .await
            .unwrap();
        repo.schedule("straico_model_update_event", Recurrence::Hourly)
            .await
            .unwrap();
        assert!(repo.is_scheduled("straico_model_update_event").await.unwrap());

        assert_eq!(repo.clear("straico_model_update_event").await.unwrap(), 2);
        assert!(!repo.is_scheduled("straico_model_update_event").await.unwrap());
        assert_eq!(repo.clear("straico_model_update_event").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_round_trips_recurrence() {
        let repo = make_repo().await;
        repo.schedule("straico_coin_check_event", Recurrence::EveryHours(6))
            .await
            .unwrap();

        let events = repo.list().await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].hook, "straico_coin_check_event");
        assert_eq!(events[0].recurrence, Recurrence::EveryHours(6));
    }
}
