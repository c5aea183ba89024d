//! Uninstall: tear down every resource the plugin registered.
//!
//! Teardown runs five steps in a fixed order (tables, options, transients,
//! scheduled jobs, file area). A step never aborts the ones after it, and
//! inside a step a failing resource never stops the remaining ones. Every
//! failure lands in the [`TeardownReport`].

use std::future::Future;
use std::path::Path;

use tracing::{error, info, warn};

use straico_core::error::AppError;
use straico_core::registry::{self, ResourceKind};
use straico_core::result::AppResult;
use straico_core::traits::DirRemoval;

use crate::HostCapabilities;
use crate::guard::UninstallSignal;
use crate::report::{StepOutcome, StepStatus, TeardownReport, TeardownStep};

/// Runs when the host removes the plugin.
#[derive(Debug, Clone)]
pub struct UninstallCoordinator {
    /// Identifier the host uses for this plugin.
    plugin: String,
    /// Host facilities to tear down.
    host: HostCapabilities,
}

impl UninstallCoordinator {
    /// Create a coordinator for `plugin`.
    pub fn new(plugin: impl Into<String>, host: HostCapabilities) -> Self {
        Self {
            plugin: plugin.into(),
            host,
        }
    }

    /// Plugin identifier this coordinator answers to.
    pub fn plugin(&self) -> &str {
        &self.plugin
    }

    /// Remove everything the plugin left behind.
    ///
    /// Refuses with an authorization error, before touching anything, unless
    /// `signal` is the host's removal signal for this plugin. Otherwise always
    /// returns a report, even when steps failed. Running it again on a clean
    /// host completes with nothing removed.
    pub async fn uninstall(&self, signal: &UninstallSignal) -> AppResult<TeardownReport> {
        if !signal.authorizes(&self.plugin) {
            warn!(plugin = %self.plugin, signal = ?signal, "Uninstall refused");
            return Err(AppError::authorization(format!(
                "Uninstall of '{}' was not requested by the host",
                self.plugin
            )));
        }

        info!(plugin = %self.plugin, "Starting uninstall");

        let steps = vec![
            self.drop_tables().await,
            self.delete_options().await,
            self.delete_transients().await,
            self.clear_jobs().await,
            self.clear_file_area().await,
        ];

        for outcome in &steps {
            match &outcome.status {
                StepStatus::Failed { errors } => error!(
                    step = %outcome.step,
                    removed = outcome.removed,
                    errors = ?errors,
                    "Teardown step failed"
                ),
                StepStatus::Skipped { reason } => {
                    info!(step = %outcome.step, reason = %reason, "Teardown step skipped")
                }
                StepStatus::Completed => info!(
                    step = %outcome.step,
                    removed = outcome.removed,
                    "Teardown step completed"
                ),
            }
        }

        let report = TeardownReport {
            plugin: self.plugin.clone(),
            steps,
        };

        if report.has_failures() {
            warn!(
                plugin = %self.plugin,
                failed = report.failures().count(),
                "Uninstall finished with failures"
            );
        } else {
            info!(
                plugin = %self.plugin,
                removed = report.total_removed(),
                "Uninstall finished"
            );
        }

        Ok(report)
    }

    /// Step A.
    async fn drop_tables(&self) -> StepOutcome {
        match self.host.schema.uninstall().await {
            Ok(dropped) => StepOutcome::completed(TeardownStep::Tables, dropped),
            Err(e) => StepOutcome::from_errors(TeardownStep::Tables, 0, vec![e.to_string()]),
        }
    }

    /// Step B.
    async fn delete_options(&self) -> StepOutcome {
        let options = &self.host.options;
        sweep(
            TeardownStep::Options,
            registry::identifiers(ResourceKind::Option),
            |key| async move { options.delete(key).await.map(u64::from) },
        )
        .await
    }

    /// Step C.
    async fn delete_transients(&self) -> StepOutcome {
        let transients = &self.host.transients;
        sweep(
            TeardownStep::Transients,
            registry::identifiers(ResourceKind::Transient),
            |key| async move { transients.delete(key).await.map(u64::from) },
        )
        .await
    }

    /// Step D.
    async fn clear_jobs(&self) -> StepOutcome {
        let scheduler = &self.host.scheduler;
        sweep(
            TeardownStep::ScheduledJobs,
            registry::identifiers(ResourceKind::ScheduledJob),
            |hook| async move { scheduler.clear(hook).await },
        )
        .await
    }

    /// Step E. Only regular files are deleted; anything else keeps the
    /// directory in place and is listed as retained.
    async fn clear_file_area(&self) -> StepOutcome {
        let mut removed = 0u64;
        let mut retained = Vec::new();
        let mut errors = Vec::new();
        let mut skipped = Vec::new();

        for subdir in registry::identifiers(ResourceKind::FileArea) {
            let dir = match self.host.files.resolve(subdir).await {
                Ok(Some(dir)) => dir,
                Ok(None) => {
                    skipped.push(format!("{subdir}: host has no upload root"));
                    continue;
                }
                Err(e) => {
                    errors.push(format!("{subdir}: {e}"));
                    continue;
                }
            };

            match self.host.files.exists(&dir).await {
                Ok(true) => {}
                Ok(false) => {
                    skipped.push(format!("{}: directory does not exist", dir.display()));
                    continue;
                }
                Err(e) => {
                    errors.push(e.to_string());
                    continue;
                }
            }

            let area = self.empty_dir(&dir).await;
            removed += area.removed;
            retained.extend(area.retained);
            errors.extend(area.errors);
        }

        if errors.is_empty() && removed == 0 && retained.is_empty() && !skipped.is_empty() {
            return StepOutcome::skipped(TeardownStep::FileArea, skipped.join("; "));
        }

        let mut outcome = StepOutcome::from_errors(TeardownStep::FileArea, removed, errors);
        outcome.retained = retained;
        outcome
    }

    async fn empty_dir(&self, dir: &Path) -> AreaSweep {
        let mut area = AreaSweep::default();

        let entries = match self.host.files.list(dir).await {
            Ok(entries) => entries,
            Err(e) => {
                area.errors.push(e.to_string());
                return area;
            }
        };

        for entry in entries {
            if !entry.is_file {
                area.retained.push(entry.path.display().to_string());
                continue;
            }
            match self.host.files.delete_file(&entry.path).await {
                Ok(true) => area.removed += 1,
                Ok(false) => {}
                Err(e) => area.errors.push(e.to_string()),
            }
        }

        match self.host.files.remove_dir(dir).await {
            Ok(DirRemoval::Removed) => area.removed += 1,
            Ok(DirRemoval::Missing) => {}
            Ok(DirRemoval::NotEmpty) => {
                warn!(dir = %dir.display(), "Upload directory kept, not empty");
            }
            Err(e) => area.errors.push(e.to_string()),
        }

        area
    }
}

#[derive(Debug, Default)]
struct AreaSweep {
    removed: u64,
    retained: Vec<String>,
    errors: Vec<String>,
}

/// Remove each identifier independently, counting what existed.
async fn sweep<F, Fut>(step: TeardownStep, identifiers: Vec<&'static str>, remove: F) -> StepOutcome
where
    F: Fn(&'static str) -> Fut,
    Fut: Future<Output = AppResult<u64>>,
{
    let mut removed = 0u64;
    let mut errors = Vec::new();

    for identifier in identifiers {
        match remove(identifier).await {
            Ok(count) => removed += count,
            Err(e) => {
                warn!(step = %step, identifier, error = %e, "Failed to remove resource");
                errors.push(format!("{identifier}: {e}"));
            }
        }
    }

    StepOutcome::from_errors(step, removed, errors)
}
