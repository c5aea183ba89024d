//! Recurring job runtime for the plugin host.
//!
//! This crate provides:
//! - A cron runtime that fires named hooks on their recurrence
//! - A dispatcher that routes fired hooks to registered handlers
//! - Registration of the plugin's own recurring jobs from its options

pub mod executor;
pub mod jobs;
pub mod scheduler;

pub use executor::{JobDispatcher, JobHandler};
pub use jobs::register_plugin_jobs;
pub use scheduler::CronScheduler;
