//! In-process cron runtime for the plugin's recurring hooks.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio_cron_scheduler::{Job as CronJob, JobScheduler as CronRuntime};
use tracing;
use uuid::Uuid;

use straico_core::error::AppError;
use straico_core::result::AppResult;
use straico_core::traits::scheduler::JobScheduler;
use straico_core::types::Recurrence;

use crate::executor::JobDispatcher;

/// Cron runtime that fires named hooks through a [`JobDispatcher`].
///
/// Every scheduled instance is tracked by hook name so `clear` can remove
/// all of them.
pub struct CronScheduler {
    /// The underlying job scheduler
    runtime: CronRuntime,
    /// Job ids registered per hook
    jobs: DashMap<String, Vec<Uuid>>,
    /// Handler routing for fired hooks
    dispatcher: Arc<JobDispatcher>,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler")
            .field("hooks", &self.jobs.len())
            .finish()
    }
}

impl CronScheduler {
    /// Create a new cron scheduler
    pub async fn new(dispatcher: Arc<JobDispatcher>) -> Result<Self, AppError> {
        let runtime = CronRuntime::new()
            .await
            .map_err(|e| AppError::scheduler(format!("Failed to create scheduler: {}", e)))?;

        Ok(Self {
            runtime,
            jobs: DashMap::new(),
            dispatcher,
        })
    }

    /// Start firing registered hooks
    pub async fn start(&self) -> Result<(), AppError> {
        self.runtime
            .start()
            .await
            .map_err(|e| AppError::scheduler(format!("Failed to start scheduler: {}", e)))?;

        tracing::info!("Cron scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler
    pub async fn shutdown(&self) -> Result<(), AppError> {
        let mut runtime = self.runtime.clone();
        runtime
            .shutdown()
            .await
            .map_err(|e| AppError::scheduler(format!("Failed to shutdown scheduler: {}", e)))?;

        tracing::info!("Cron scheduler shut down");
        Ok(())
    }

    /// Hooks that currently have at least one instance
    pub fn hooks(&self) -> Vec<String> {
        let mut hooks: Vec<String> = self
            .jobs
            .iter()
            .filter(|entry| !entry.value().is_empty())
            .map(|entry| entry.key().clone())
            .collect();
        hooks.sort();
        hooks
    }

    /// Register `hook` to fire every `interval`
    async fn schedule_every(&self, hook: &str, interval: Duration) -> AppResult<()> {
        let dispatcher = Arc::clone(&self.dispatcher);
        let hook_name = hook.to_string();
        let job = CronJob::new_repeated_async(interval, move |_uuid, _lock| {
            let dispatcher = Arc::clone(&dispatcher);
            let hook = hook_name.clone();
            Box::pin(async move {
                dispatcher.dispatch(&hook).await;
            })
        })
        .map_err(|e| AppError::scheduler(format!("Failed to create '{}' schedule: {}", hook, e)))?;

        let id = self
            .runtime
            .add(job)
            .await
            .map_err(|e| AppError::scheduler(format!("Failed to add '{}' schedule: {}", hook, e)))?;

        self.jobs.entry(hook.to_string()).or_default().push(id);
        Ok(())
    }
}

#[async_trait]
impl JobScheduler for CronScheduler {
    async fn schedule(&self, hook: &str, recurrence: Recurrence) -> AppResult<()> {
        self.schedule_every(hook, recurrence.interval()).await?;
        tracing::info!("Registered: {} ({})", hook, recurrence);
        Ok(())
    }

    async fn is_scheduled(&self, hook: &str) -> AppResult<bool> {
        Ok(self
            .jobs
            .get(hook)
            .map(|ids| !ids.is_empty())
            .unwrap_or(false))
    }

    async fn clear(&self, hook: &str) -> AppResult<u64> {
        let Some((_, ids)) = self.jobs.remove(hook) else {
            return Ok(0);
        };

        let runtime = &self.runtime;
        let removal = remove_instances(ids, |id| async move {
            runtime.remove(&id).await.map_err(|e| e.to_string())
        })
        .await;

        if !removal.kept.is_empty() {
            // Still registered in the runtime, so keep tracking them.
            self.jobs
                .entry(hook.to_string())
                .or_default()
                .extend(removal.kept.iter().copied());
            return Err(AppError::scheduler(format!(
                "Failed to remove {} instance(s) of '{}': {}",
                removal.kept.len(),
                hook,
                removal.errors.join("; ")
            )));
        }

        tracing::debug!(hook, cleared = removal.cleared, "Cleared scheduled hook");
        Ok(removal.cleared)
    }
}

/// Outcome of removing a hook's instances from the runtime.
#[derive(Debug, Default)]
struct Removal {
    cleared: u64,
    kept: Vec<Uuid>,
    errors: Vec<String>,
}

/// Try every id, keeping the ones whose removal failed.
async fn remove_instances<F, Fut>(ids: Vec<Uuid>, remove: F) -> Removal
where
    F: Fn(Uuid) -> Fut,
    Fut: Future<Output = Result<(), String>>,
{
    let mut removal = Removal::default();
    for id in ids {
        match remove(id).await {
            Ok(()) => removal.cleared += 1,
            Err(e) => {
                removal.errors.push(format!("{id}: {e}"));
                removal.kept.push(id);
            }
        }
    }
    removal
}
