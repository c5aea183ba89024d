//! Host schema bootstrap.
//!
//! The host owns three tables that plugins write into: `options`,
//! `transients` and `cron_events`. They are created here and never dropped
//! by a plugin uninstall; only rows keyed by plugin identifiers are removed.

use sqlx::SqlitePool;
use tracing::info;

use straico_core::error::{AppError, ErrorKind};

/// Host tables, created in order.
const HOST_SCHEMA: &[(&str, &str)] = &[
    (
        "options",
        "CREATE TABLE IF NOT EXISTS options (
            name TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL
        )",
    ),
    (
        "transients",
        "CREATE TABLE IF NOT EXISTS transients (
            name TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL,
            expires_at INTEGER
        )",
    ),
    (
        "cron_events",
        "CREATE TABLE IF NOT EXISTS cron_events (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            hook TEXT NOT NULL,
            interval_seconds INTEGER NOT NULL
        )",
    ),
    (
        "cron_events_hook_idx",
        "CREATE INDEX IF NOT EXISTS cron_events_hook_idx ON cron_events (hook)",
    ),
];

/// Create the host tables if they do not exist yet.
pub async fn bootstrap_host_schema(pool: &SqlitePool) -> Result<(), AppError> {
    for (name, ddl) in HOST_SCHEMA {
        sqlx::query(ddl).execute(pool).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to create host table '{name}': {e}"),
                e,
            )
        })?;
    }

    info!("Host schema ready");
    Ok(())
}

/// Whether a table with the given name exists.
pub async fn table_exists(pool: &SqlitePool, table: &str) -> Result<bool, AppError> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?")
            .bind(table)
            .fetch_one(pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to inspect sqlite_master", e)
            })?;
    Ok(count > 0)
}
