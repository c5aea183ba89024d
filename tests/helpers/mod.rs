//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::time::Duration;

use tempfile::TempDir;

use straico_core::config::AppConfig;
use straico_core::registry::{self, ResourceKind};
use straico_core::types::Recurrence;
use straico_database::DatabasePool;
use straico_host::{Host, ResourceState};

/// Plugin identifier used by every test host.
pub const PLUGIN: &str = "straico-integration";

/// Host over an in-memory database and a temporary upload root.
pub struct TestHost {
    /// The wired host
    pub host: Host,
    /// Upload root, removed when the test ends
    pub upload_root: TempDir,
}

impl TestHost {
    /// Host with the default (database) transient store
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Host with a tweaked configuration
    pub async fn with_config(tweak: impl FnOnce(&mut AppConfig)) -> Self {
        let upload_root = tempfile::tempdir().expect("Failed to create upload root");

        let mut config = AppConfig::default();
        config.plugin.identifier = PLUGIN.to_string();
        config.storage.upload_root = Some(upload_root.path().to_path_buf());
        tweak(&mut config);

        let db = DatabasePool::connect_in_memory()
            .await
            .expect("Failed to open in-memory database");
        let host = Host::with_pool(config, db)
            .await
            .expect("Failed to build host");

        Self { host, upload_root }
    }

    /// The plugin's directory under the upload root
    pub fn area_dir(&self) -> PathBuf {
        self.upload_root.path().join(registry::FILE_AREA)
    }

    /// Store a value for every registered option, transient and job, and
    /// put two files in the upload directory.
    pub async fn seed_plugin_data(&self) {
        let caps = self.host.capabilities();
        for key in registry::identifiers(ResourceKind::Option) {
            caps.options.set(key, "1").await.expect("Failed to set option");
        }
        for key in registry::identifiers(ResourceKind::Transient) {
            caps.transients
                .set(key, "[]", Duration::from_secs(3600))
                .await
                .expect("Failed to set transient");
        }
        for hook in registry::identifiers(ResourceKind::ScheduledJob) {
            caps.scheduler
                .schedule(hook, Recurrence::Daily)
                .await
                .expect("Failed to schedule job");
        }

        std::fs::create_dir_all(self.area_dir()).expect("Failed to create upload dir");
        std::fs::write(self.area_dir().join("models.json"), "[]").expect("Failed to write file");
        std::fs::write(self.area_dir().join("balance.log"), "0").expect("Failed to write file");
    }

    /// Current state of every registry resource
    pub async fn inventory(&self) -> Vec<ResourceState> {
        self.host
            .inventory()
            .await
            .expect("Failed to read inventory")
    }

    /// Identifiers of registry resources that exist right now
    pub async fn present(&self) -> Vec<&'static str> {
        self.inventory()
            .await
            .into_iter()
            .filter(|s| s.present)
            .map(|s| s.identifier)
            .collect()
    }
}
