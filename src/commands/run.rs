//! Scheduled job runner.

use std::sync::Arc;

use straico_core::error::AppError;
use straico_core::result::AppResult;
use straico_core::traits::JobScheduler;
use straico_host::Host;
use straico_scheduler::{CronScheduler, JobDispatcher, register_plugin_jobs};

use crate::output;

/// Execute the run command
pub async fn execute(host: &Host) -> AppResult<()> {
    if !host.config().scheduler.enabled {
        output::print_warning("Scheduler is disabled in configuration");
        return Ok(());
    }

    let jobs = register_plugin_jobs(host.options(), host.cron_events()).await?;
    for job in &jobs {
        output::print_kv(job.hook, &job.recurrence.to_string());
    }

    // Job bodies are attached by registering handlers on the dispatcher.
    let cron = CronScheduler::new(Arc::new(JobDispatcher::new())).await?;
    for event in host.cron_events().list().await? {
        cron.schedule(&event.hook, event.recurrence).await?;
    }
    cron.start().await?;

    output::print_success("Scheduler running, press Ctrl-C to stop");
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| AppError::internal(format!("Failed to listen for Ctrl-C: {}", e)))?;

    cron.shutdown().await?;
    host.close().await;
    Ok(())
}
