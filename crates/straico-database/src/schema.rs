//! Schema manager for the plugin's own tables.

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::{debug, info};

use straico_core::error::{AppError, ErrorKind};
use straico_core::registry;
use straico_core::result::AppResult;
use straico_core::traits::options::KeyValueStore;
use straico_core::traits::schema::SchemaManager;

use crate::migration::table_exists;
use crate::repositories::option::OptionRepository;

/// Version written to the schema version option after install.
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Plugin tables with their DDL, created in order and dropped in reverse.
const PLUGIN_TABLES: &[(&str, &str)] = &[
    (
        "straico_shortcodes",
        "CREATE TABLE IF NOT EXISTS straico_shortcodes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            agent_id TEXT NOT NULL,
            settings TEXT NOT NULL DEFAULT '{}',
            created_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now')),
            updated_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
        )",
    ),
    (
        "straico_agent_log",
        "CREATE TABLE IF NOT EXISTS straico_agent_log (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            shortcode_id INTEGER REFERENCES straico_shortcodes (id) ON DELETE CASCADE,
            prompt TEXT NOT NULL,
            coins_used REAL NOT NULL DEFAULT 0,
            created_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
        )",
    ),
];

/// Owns the `straico_*` table set.
///
/// `install` creates the tables and records [`SCHEMA_VERSION`] under the
/// schema version option; `uninstall` drops the tables.
#[derive(Debug, Clone)]
pub struct PluginSchema {
    pool: SqlitePool,
    options: OptionRepository,
}

impl PluginSchema {
    /// Create a schema manager over the host database.
    pub fn new(pool: SqlitePool) -> Self {
        let options = OptionRepository::new(pool.clone());
        Self { pool, options }
    }
}

#[async_trait]
impl SchemaManager for PluginSchema {
    fn tables(&self) -> Vec<String> {
        PLUGIN_TABLES
            .iter()
            .map(|(name, _)| (*name).to_string())
            .collect()
    }

    async fn install(&self) -> AppResult<()> {
        for (name, ddl) in PLUGIN_TABLES {
            sqlx::query(ddl).execute(&self.pool).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to create table '{name}': {e}"),
                    e,
                )
            })?;
            debug!(table = name, "Created plugin table");
        }

        self.options
            .set(registry::OPTION_DB_VERSION, SCHEMA_VERSION)
            .await?;

        info!(
            tables = PLUGIN_TABLES.len(),
            version = SCHEMA_VERSION,
            "Plugin schema installed"
        );
        Ok(())
    }

    async fn uninstall(&self) -> AppResult<u64> {
        let mut dropped = 0u64;
        for (name, _) in PLUGIN_TABLES.iter().rev() {
            if !table_exists(&self.pool, name).await? {
                continue;
            }
            sqlx::query(&format!("DROP TABLE IF EXISTS {name}"))
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(
                        ErrorKind::Database,
                        format!("Failed to drop table '{name}': {e}"),
                        e,
                    )
                })?;
            debug!(table = name, "Dropped plugin table");
            dropped += 1;
        }

        info!(dropped, "Plugin schema removed");
        Ok(dropped)
    }
}
