//! # straico-host
//!
//! Concrete host for the Straico plugin lifecycle: wires the SQLite option,
//! transient and cron stores, the plugin schema and the local upload area
//! into the lifecycle coordinators.

pub mod host;

pub use host::{Host, ResourceState};
