//! Activation: create the plugin's table set.

use std::sync::Arc;

use tracing::{error, info};

use straico_core::error::AppError;
use straico_core::registry::{self, ResourceKind};
use straico_core::result::AppResult;
use straico_core::traits::SchemaManager;

/// Runs once when the host activates the plugin.
#[derive(Debug, Clone)]
pub struct InstallCoordinator {
    schema: Arc<dyn SchemaManager>,
}

impl InstallCoordinator {
    /// Create a coordinator over the plugin's schema manager.
    pub fn new(schema: Arc<dyn SchemaManager>) -> Self {
        Self { schema }
    }

    /// Create the plugin tables.
    ///
    /// Any failure is returned to the host so activation can be reported as
    /// failed.
    pub async fn install(&self) -> AppResult<()> {
        let table_sets = registry::identifiers(ResourceKind::TableSet);
        info!(
            table_sets = ?table_sets,
            tables = ?self.schema.tables(),
            "Activating plugin"
        );

        self.schema.install().await.map_err(|e| {
            error!(error = %e, "Activation failed");
            AppError::with_source(e.kind, format!("Activation failed: {}", e.message), e)
        })?;

        info!("Plugin activated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::FakeSchema;
    use straico_core::error::ErrorKind;

    #[tokio::test]
    async fn test_install_creates_tables() {
        let schema = Arc::new(FakeSchema::default());
        let coordinator = InstallCoordinator::new(schema.clone());

        coordinator.install().await.unwrap();
        assert!(schema.is_installed());
    }

    #[tokio::test]
    async fn test_install_propagates_failure() {
        let schema = Arc::new(FakeSchema::failing());
        let coordinator = InstallCoordinator::new(schema.clone());

        let err = coordinator.install().await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Database);
        assert!(err.message.starts_with("Activation failed"));
        assert!(!schema.is_installed());
    }
}
