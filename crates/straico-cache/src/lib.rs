//! # straico-cache
//!
//! Transient store providers for the plugin host:
//!
//! - **memory**: in-process store using [moka](https://crates.io/crates/moka)
//!   with per-entry expiry
//! - **database**: the host's persisted `transients` table, supplied by the
//!   caller (see `straico-database`)
//!
//! The provider is selected at runtime based on configuration.

#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;

pub use provider::CacheManager;
