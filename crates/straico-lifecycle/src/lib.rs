//! Lifecycle coordinators for the Straico plugin.
//!
//! [`InstallCoordinator`] runs on activation and materializes the plugin's
//! schema. [`UninstallCoordinator`] runs on removal and tears down every
//! resource in the static registry, one isolated step per resource kind.

pub mod activator;
pub mod guard;
pub mod report;
pub mod uninstaller;

#[cfg(test)]
mod fakes;

use std::sync::Arc;

use straico_core::traits::{EphemeralCache, FileArea, JobScheduler, KeyValueStore, SchemaManager};

pub use activator::InstallCoordinator;
pub use guard::UninstallSignal;
pub use report::{StepOutcome, StepStatus, TeardownReport, TeardownStep};
pub use uninstaller::UninstallCoordinator;

/// Host facilities the coordinators operate on.
#[derive(Debug, Clone)]
pub struct HostCapabilities {
    /// Owner of the plugin tables.
    pub schema: Arc<dyn SchemaManager>,
    /// Host option store.
    pub options: Arc<dyn KeyValueStore>,
    /// Host transient store.
    pub transients: Arc<dyn EphemeralCache>,
    /// Host scheduler.
    pub scheduler: Arc<dyn JobScheduler>,
    /// Host upload area.
    pub files: Arc<dyn FileArea>,
}
