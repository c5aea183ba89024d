//! Plugin identity configuration.

use serde::{Deserialize, Serialize};

/// Identity of the plugin this host manages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Plugin identifier the uninstall signal must carry.
    #[serde(default = "default_identifier")]
    pub identifier: String,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            identifier: default_identifier(),
        }
    }
}

fn default_identifier() -> String {
    "straico-integration".to_string()
}
