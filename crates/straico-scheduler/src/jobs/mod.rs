//! The plugin's own recurring jobs.

pub mod registration;

pub use registration::{PluginJob, register_plugin_jobs};
