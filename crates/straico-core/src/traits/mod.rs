//! Capability traits defined in `straico-core` and implemented by other crates.
//!
//! The lifecycle coordinators only see these traits, so every host facility
//! can be replaced by a fake in tests.

pub mod cache;
pub mod file_area;
pub mod options;
pub mod scheduler;
pub mod schema;

pub use cache::EphemeralCache;
pub use file_area::{AreaEntry, DirRemoval, FileArea};
pub use options::KeyValueStore;
pub use scheduler::JobScheduler;
pub use schema::SchemaManager;
