//! Hook dispatcher: routes fired hooks to registered handlers.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing;

use straico_core::error::AppError;

/// Trait for the body of a recurring job.
#[async_trait]
pub trait JobHandler: Send + Sync + std::fmt::Debug {
    /// Hook name this handler runs for.
    fn hook(&self) -> &str;

    /// Run one occurrence of the job.
    async fn execute(&self) -> Result<(), JobExecutionError>;
}

/// Error from job execution
#[derive(Debug, thiserror::Error)]
pub enum JobExecutionError {
    /// Permanent failure; the next occurrence will fail the same way
    #[error("Permanent job failure: {0}")]
    Permanent(String),

    /// Transient failure; the next occurrence may succeed
    #[error("Transient job failure: {0}")]
    Transient(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(#[from] AppError),
}

/// Dispatches fired hooks to the handler registered for them.
#[derive(Debug, Default)]
pub struct JobDispatcher {
    /// Registered handlers by hook name
    handlers: HashMap<String, Arc<dyn JobHandler>>,
}

impl JobDispatcher {
    /// Create a dispatcher with no handlers
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler, replacing any previous one for the same hook
    pub fn register(&mut self, handler: Arc<dyn JobHandler>) {
        let hook = handler.hook().to_string();
        tracing::info!("Registered job handler for hook '{}'", hook);
        self.handlers.insert(hook, handler);
    }

    /// Whether a handler is registered for `hook`
    pub fn has_handler(&self, hook: &str) -> bool {
        self.handlers.contains_key(hook)
    }

    /// Run the handler for `hook`.
    ///
    /// Returns `false` when no handler is registered. Handler failures are
    /// logged; a failed occurrence never stops the schedule.
    pub async fn dispatch(&self, hook: &str) -> bool {
        let Some(handler) = self.handlers.get(hook) else {
            tracing::debug!(hook, "Hook fired with no handler attached");
            return false;
        };

        tracing::info!(hook, "Running scheduled job");
        if let Err(e) = handler.execute().await {
            tracing::error!(hook, error = %e, "Scheduled job failed");
        }
        true
    }
}
