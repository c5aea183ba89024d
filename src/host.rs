//! Host wiring: builds every capability from [`AppConfig`].

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use straico_cache::CacheManager;
use straico_core::config::AppConfig;
use straico_core::registry::{self, ResourceKind};
use straico_core::result::AppResult;
use straico_database::migration::{bootstrap_host_schema, table_exists};
use straico_database::repositories::{CronEventRepository, OptionRepository, TransientRepository};
use straico_database::{DatabasePool, PluginSchema};
use straico_lifecycle::{
    HostCapabilities, InstallCoordinator, UninstallCoordinator, UninstallSignal,
};
use straico_storage::LocalUploadArea;

/// Whether one registry resource currently exists on the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceState {
    /// Resource kind.
    pub kind: ResourceKind,
    /// Registry identifier.
    pub identifier: &'static str,
    /// Feature that owns it.
    pub owner: &'static str,
    /// Present right now.
    pub present: bool,
}

/// A running host.
#[derive(Debug)]
pub struct Host {
    config: AppConfig,
    db: DatabasePool,
    options: Arc<OptionRepository>,
    cron_events: Arc<CronEventRepository>,
    capabilities: HostCapabilities,
}

impl Host {
    /// Connect to the configured database and build the host.
    pub async fn open(config: AppConfig) -> AppResult<Self> {
        let db = DatabasePool::connect(&config.database).await?;
        Self::with_pool(config, db).await
    }

    /// Build the host over an existing pool.
    ///
    /// Creates the host tables when they do not exist yet.
    pub async fn with_pool(config: AppConfig, db: DatabasePool) -> AppResult<Self> {
        bootstrap_host_schema(db.pool()).await?;

        let pool = db.pool().clone();
        let options = Arc::new(OptionRepository::new(pool.clone()));
        let cron_events = Arc::new(CronEventRepository::new(pool.clone()));
        let transients = CacheManager::new(
            &config.cache,
            Arc::new(TransientRepository::new(pool.clone())),
        )?;
        let files = LocalUploadArea::new(config.storage.upload_root.clone());

        if files.root().is_none() {
            info!("No upload root configured");
        }

        let capabilities = HostCapabilities {
            schema: Arc::new(PluginSchema::new(pool)),
            options: options.clone(),
            transients: Arc::new(transients),
            scheduler: cron_events.clone(),
            files: Arc::new(files),
        };

        Ok(Self {
            config,
            db,
            options,
            cron_events,
            capabilities,
        })
    }

    /// Loaded configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Database pool.
    pub fn db(&self) -> &DatabasePool {
        &self.db
    }

    /// Option store.
    pub fn options(&self) -> &OptionRepository {
        &self.options
    }

    /// Persisted cron registrations.
    pub fn cron_events(&self) -> &CronEventRepository {
        &self.cron_events
    }

    /// Capabilities handed to the coordinators.
    pub fn capabilities(&self) -> &HostCapabilities {
        &self.capabilities
    }

    /// Activation coordinator.
    pub fn installer(&self) -> InstallCoordinator {
        InstallCoordinator::new(Arc::clone(&self.capabilities.schema))
    }

    /// Uninstall coordinator for the configured plugin.
    pub fn uninstaller(&self) -> UninstallCoordinator {
        UninstallCoordinator::new(
            self.config.plugin.identifier.clone(),
            self.capabilities.clone(),
        )
    }

    /// The signal this host raises when it removes its plugin.
    pub fn removal_signal(&self) -> UninstallSignal {
        UninstallSignal::host(self.config.plugin.identifier.clone())
    }

    /// Check every registry resource against the live host.
    pub async fn inventory(&self) -> AppResult<Vec<ResourceState>> {
        let caps = &self.capabilities;
        let mut states = Vec::with_capacity(registry::entries().len());

        for entry in registry::entries() {
            let present = match entry.kind {
                ResourceKind::Option => caps.options.get(entry.identifier).await?.is_some(),
                ResourceKind::Transient => caps.transients.get(entry.identifier).await?.is_some(),
                ResourceKind::ScheduledJob => caps.scheduler.is_scheduled(entry.identifier).await?,
                ResourceKind::FileArea => match caps.files.resolve(entry.identifier).await? {
                    Some(dir) => caps.files.exists(&dir).await?,
                    None => false,
                },
                ResourceKind::TableSet => {
                    let mut any = false;
                    for table in caps.schema.tables() {
                        any |= table_exists(self.db.pool(), &table).await?;
                    }
                    any
                }
            };

            states.push(ResourceState {
                kind: entry.kind,
                identifier: entry.identifier,
                owner: entry.owner,
                present,
            });
        }

        Ok(states)
    }

    /// Close the database pool.
    pub async fn close(&self) {
        self.db.close().await;
    }
}
