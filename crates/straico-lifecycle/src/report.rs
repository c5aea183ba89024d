//! Teardown report returned by the uninstall coordinator.

use std::fmt;

use serde::Serialize;

/// The five independent teardown steps, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TeardownStep {
    /// Drop the plugin tables.
    Tables,
    /// Delete plugin options.
    Options,
    /// Delete plugin transients.
    Transients,
    /// Clear plugin job hooks.
    ScheduledJobs,
    /// Empty and remove the plugin upload directory.
    FileArea,
}

impl fmt::Display for TeardownStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tables => write!(f, "tables"),
            Self::Options => write!(f, "options"),
            Self::Transients => write!(f, "transients"),
            Self::ScheduledJobs => write!(f, "scheduled_jobs"),
            Self::FileArea => write!(f, "file_area"),
        }
    }
}

/// How a step ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepStatus {
    /// Every target was handled; absent targets count as handled.
    Completed,
    /// Nothing to do, e.g. the host has no upload root.
    Skipped {
        /// Why the step did nothing.
        reason: String,
    },
    /// At least one target could not be removed.
    Failed {
        /// One message per failed target.
        errors: Vec<String>,
    },
}

/// Result of one teardown step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepOutcome {
    /// Which step.
    pub step: TeardownStep,
    /// How it ended.
    #[serde(flatten)]
    pub status: StepStatus,
    /// Resources that existed and were removed.
    pub removed: u64,
    /// Entries deliberately left in place (non-file upload entries).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub retained: Vec<String>,
}

impl StepOutcome {
    /// A step that handled every target.
    pub fn completed(step: TeardownStep, removed: u64) -> Self {
        Self {
            step,
            status: StepStatus::Completed,
            removed,
            retained: Vec::new(),
        }
    }

    /// A step that had nothing to act on.
    pub fn skipped(step: TeardownStep, reason: impl Into<String>) -> Self {
        Self {
            step,
            status: StepStatus::Skipped {
                reason: reason.into(),
            },
            removed: 0,
            retained: Vec::new(),
        }
    }

    /// Build an outcome from what a step removed and the errors it hit.
    pub fn from_errors(step: TeardownStep, removed: u64, errors: Vec<String>) -> Self {
        let status = if errors.is_empty() {
            StepStatus::Completed
        } else {
            StepStatus::Failed { errors }
        };
        Self {
            step,
            status,
            removed,
            retained: Vec::new(),
        }
    }

    /// Whether the step failed.
    pub fn is_failed(&self) -> bool {
        matches!(self.status, StepStatus::Failed { .. })
    }
}

/// Outcome of a full uninstall.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeardownReport {
    /// Plugin that was uninstalled.
    pub plugin: String,
    /// One outcome per step, in execution order.
    pub steps: Vec<StepOutcome>,
}

impl TeardownReport {
    /// Whether any step failed.
    pub fn has_failures(&self) -> bool {
        self.steps.iter().any(StepOutcome::is_failed)
    }

    /// Steps that failed.
    pub fn failures(&self) -> impl Iterator<Item = &StepOutcome> {
        self.steps.iter().filter(|s| s.is_failed())
    }

    /// Outcome of a given step.
    pub fn outcome(&self, step: TeardownStep) -> Option<&StepOutcome> {
        self.steps.iter().find(|s| s.step == step)
    }

    /// Total number of resources removed across all steps.
    pub fn total_removed(&self) -> u64 {
        self.steps.iter().map(|s| s.removed).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_errors() {
        let ok = StepOutcome::from_errors(TeardownStep::Options, 3, Vec::new());
        assert_eq!(ok.status, StepStatus::Completed);

        let failed = StepOutcome::from_errors(
            TeardownStep::Options,
            2,
            vec!["straico_api_key: locked".to_string()],
        );
        assert!(failed.is_failed());
        assert_eq!(failed.removed, 2);
    }

    #[test]
    fn test_report_summary() {
        let report = TeardownReport {
            plugin: "straico-integration".to_string(),
            steps: vec![
                StepOutcome::completed(TeardownStep::Tables, 2),
                StepOutcome::from_errors(TeardownStep::Options, 1, vec!["boom".into()]),
                StepOutcome::skipped(TeardownStep::FileArea, "no upload root"),
            ],
        };
        assert!(report.has_failures());
        assert_eq!(report.failures().count(), 1);
        assert_eq!(report.total_removed(), 3);
        assert!(matches!(
            report.outcome(TeardownStep::FileArea).map(|s| &s.status),
            Some(StepStatus::Skipped { .. })
        ));
    }

    #[test]
    fn test_serializes_flat_status() {
        let outcome = StepOutcome::skipped(TeardownStep::FileArea, "no upload root");
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["step"], "file_area");
        assert_eq!(json["status"], "skipped");
        assert_eq!(json["reason"], "no upload root");
        assert!(json.get("retained").is_none());
    }
}
