//! # straico-core
//!
//! Core crate for the Straico plugin host. Contains the static resource
//! registry, the capability traits the lifecycle coordinators are written
//! against, configuration schemas, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Straico crates.

pub mod config;
pub mod error;
pub mod registry;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use registry::{ManagedResource, ResourceKind};
pub use result::AppResult;
