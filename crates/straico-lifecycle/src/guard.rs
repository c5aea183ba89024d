//! Uninstall guard.

/// How the uninstall entry point was reached.
///
/// Only the host builds [`UninstallSignal::Host`], and only on its own
/// plugin-removal path. Anything else must not destroy data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UninstallSignal {
    /// The host is removing `plugin`.
    Host {
        /// Identifier of the plugin being removed.
        plugin: String,
    },
    /// Reached without the host's removal path.
    Direct,
}

impl UninstallSignal {
    /// Signal raised by the host when it removes `plugin`.
    pub fn host(plugin: impl Into<String>) -> Self {
        Self::Host {
            plugin: plugin.into(),
        }
    }

    /// Whether this signal authorizes removing `plugin`.
    pub fn authorizes(&self, plugin: &str) -> bool {
        matches!(self, Self::Host { plugin: p } if p == plugin)
    }
}
