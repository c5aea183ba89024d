//! Static registry of every persistent resource the plugin owns.
//!
//! Install and uninstall both read from [`REGISTRY`], so the set of
//! resources created and the set of resources removed cannot drift apart.
//! The table is immutable configuration; nothing mutates it at runtime.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::error::AppError;
use crate::result::AppResult;

/// Category of a managed resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Persistent key-value setting in the host option store.
    Option,
    /// Expiring cache entry in the host transient store.
    Transient,
    /// Named recurring job registered with the host scheduler.
    ScheduledJob,
    /// Plugin-owned subdirectory under the host upload root.
    FileArea,
    /// Set of plugin tables owned by the schema manager.
    TableSet,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Option => write!(f, "option"),
            Self::Transient => write!(f, "transient"),
            Self::ScheduledJob => write!(f, "scheduled_job"),
            Self::FileArea => write!(f, "file_area"),
            Self::TableSet => write!(f, "table_set"),
        }
    }
}

/// Declarative record of one externally visible artifact the plugin owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ManagedResource {
    /// Resource category.
    pub kind: ResourceKind,
    /// Key unique within `kind` (option name, hook name, directory name...).
    pub identifier: &'static str,
    /// Logical subsystem that creates the resource. Audit only.
    pub owner: &'static str,
}

impl ManagedResource {
    const fn new(kind: ResourceKind, identifier: &'static str, owner: &'static str) -> Self {
        Self {
            kind,
            identifier,
            owner,
        }
    }
}

// ── Identifiers ───────────────────────────────────────────

/// Straico API key.
pub const OPTION_API_KEY: &str = "straico_api_key";
/// How often the model list is refreshed.
pub const OPTION_MODEL_UPDATE_FREQUENCY: &str = "straico_model_update_frequency";
/// Whether admins are notified about model list changes.
pub const OPTION_NOTIFY_MODEL_CHANGES: &str = "straico_notify_model_changes";
/// Recipients of model change notifications.
pub const OPTION_MODEL_NOTIFICATION_EMAILS: &str = "straico_model_notification_emails";
/// Whether low coin balance notifications are enabled.
pub const OPTION_NOTIFY_LOW_COINS: &str = "straico_notify_low_coins";
/// Coin balance below which a notification is sent.
pub const OPTION_LOW_COIN_THRESHOLD: &str = "straico_low_coin_threshold";
/// How often the coin balance is checked.
pub const OPTION_COIN_CHECK_FREQUENCY: &str = "straico_coin_check_frequency";
/// Recipients of low coin notifications.
pub const OPTION_LOW_COIN_NOTIFICATION_EMAILS: &str = "straico_low_coin_notification_emails";
/// Schema version marker written by the schema manager.
pub const OPTION_DB_VERSION: &str = "straico_db_version";

/// Last fetched model list, used to detect changes.
pub const TRANSIENT_PREVIOUS_MODELS: &str = "straico_previous_models";
/// Marker that throttles low balance notifications.
pub const TRANSIENT_LAST_BALANCE_NOTIFICATION: &str = "straico_last_balance_notification";

/// Recurring model list refresh.
pub const JOB_MODEL_UPDATE: &str = "straico_model_update_event";
/// Recurring coin balance check.
pub const JOB_COIN_CHECK: &str = "straico_coin_check_event";

/// Subdirectory of the host upload root the plugin writes to.
pub const FILE_AREA: &str = "straico";

/// Table prefix of the plugin's table set.
pub const TABLE_SET: &str = "straico";

/// Every resource the plugin may create over its lifetime.
pub static REGISTRY: &[ManagedResource] = &[
    ManagedResource::new(ResourceKind::Option, OPTION_API_KEY, "settings"),
    ManagedResource::new(ResourceKind::Option, OPTION_MODEL_UPDATE_FREQUENCY, "models"),
    ManagedResource::new(ResourceKind::Option, OPTION_NOTIFY_MODEL_CHANGES, "models"),
    ManagedResource::new(ResourceKind::Option, OPTION_MODEL_NOTIFICATION_EMAILS, "models"),
    ManagedResource::new(ResourceKind::Option, OPTION_NOTIFY_LOW_COINS, "balance"),
    ManagedResource::new(ResourceKind::Option, OPTION_LOW_COIN_THRESHOLD, "balance"),
    ManagedResource::new(ResourceKind::Option, OPTION_COIN_CHECK_FREQUENCY, "balance"),
    ManagedResource::new(ResourceKind::Option, OPTION_LOW_COIN_NOTIFICATION_EMAILS, "balance"),
    ManagedResource::new(ResourceKind::Option, OPTION_DB_VERSION, "database"),
    ManagedResource::new(ResourceKind::Transient, TRANSIENT_PREVIOUS_MODELS, "models"),
    ManagedResource::new(ResourceKind::Transient, TRANSIENT_LAST_BALANCE_NOTIFICATION, "balance"),
    ManagedResource::new(ResourceKind::ScheduledJob, JOB_MODEL_UPDATE, "models"),
    ManagedResource::new(ResourceKind::ScheduledJob, JOB_COIN_CHECK, "balance"),
    ManagedResource::new(ResourceKind::FileArea, FILE_AREA, "uploads"),
    ManagedResource::new(ResourceKind::TableSet, TABLE_SET, "database"),
];

/// Return the full registry.
pub fn entries() -> &'static [ManagedResource] {
    REGISTRY
}

/// Return the identifiers of one kind, in declaration order.
pub fn identifiers(kind: ResourceKind) -> Vec<&'static str> {
    REGISTRY
        .iter()
        .filter(|r| r.kind == kind)
        .map(|r| r.identifier)
        .collect()
}

/// Check that every `(kind, identifier)` pair is declared once and no
/// identifier is empty.
pub fn validate(entries: &[ManagedResource]) -> AppResult<()> {
    let mut seen = HashSet::new();
    for entry in entries {
        if entry.identifier.trim().is_empty() {
            return Err(AppError::validation(format!(
                "Empty identifier for {} owned by '{}'",
                entry.kind, entry.owner
            )));
        }
        if !seen.insert((entry.kind, entry.identifier)) {
            return Err(AppError::validation(format!(
                "Duplicate {} '{}'",
                entry.kind, entry.identifier
            )));
        }
    }
    Ok(())
}
