//! # straico-storage
//!
//! Upload area providers for the plugin host. The local filesystem is the
//! only backend; the host's upload root comes from configuration.

pub mod providers;

pub use providers::local::LocalUploadArea;
