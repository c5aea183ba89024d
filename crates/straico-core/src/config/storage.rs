//! Upload area configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Host upload area configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Base directory the host stores uploads in.
    ///
    /// When unset the host has no upload root and file-area teardown is
    /// skipped.
    #[serde(default)]
    pub upload_root: Option<PathBuf>,
}
