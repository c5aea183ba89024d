//! # straico-database
//!
//! SQLite connection management, the host tables (options, transients,
//! cron events) and the schema manager that owns the plugin's own tables.

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod schema;

pub use connection::DatabasePool;
pub use schema::PluginSchema;
