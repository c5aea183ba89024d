//! Plugin uninstall command.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use straico_core::error::AppError;
use straico_core::result::AppResult;
use straico_host::Host;
use straico_lifecycle::{StepStatus, TeardownReport};

use crate::output::{self, OutputFormat};

/// Arguments for the uninstall command
#[derive(Debug, Args)]
pub struct UninstallArgs {
    /// Skip confirmation prompt
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Serialize, Tabled)]
struct StepRow {
    #[tabled(rename = "Step")]
    step: String,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Removed")]
    removed: u64,
    #[tabled(rename = "Detail")]
    detail: String,
}

/// Execute the uninstall command
pub async fn execute(args: &UninstallArgs, host: &Host, format: OutputFormat) -> AppResult<()> {
    let plugin = &host.config().plugin.identifier;

    if !args.force {
        let confirm = dialoguer::Confirm::new()
            .with_prompt(format!(
                "This will DROP the tables and delete every option, transient, job and upload of '{}'. Continue?",
                plugin
            ))
            .default(false)
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {}", e)))?;

        if !confirm {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let report = host.uninstaller().uninstall(&host.removal_signal()).await?;
    host.close().await;

    match format {
        OutputFormat::Json => output::print_json(&report, "{}"),
        OutputFormat::Table => print_report(&report),
    }

    if report.has_failures() {
        return Err(AppError::internal(format!(
            "Uninstall of '{}' finished with {} failed step(s)",
            report.plugin,
            report.failures().count()
        )));
    }
    Ok(())
}

fn print_report(report: &TeardownReport) {
    let rows: Vec<StepRow> = report
        .steps
        .iter()
        .map(|outcome| {
            let (status, mut detail) = match &outcome.status {
                StepStatus::Completed => ("completed", String::new()),
                StepStatus::Skipped { reason } => ("skipped", reason.clone()),
                StepStatus::Failed { errors } => ("failed", errors.join("; ")),
            };
            if !outcome.retained.is_empty() {
                if !detail.is_empty() {
                    detail.push_str("; ");
                }
                detail.push_str(&format!("kept: {}", outcome.retained.join(", ")));
            }
            StepRow {
                step: outcome.step.to_string(),
                status,
                removed: outcome.removed,
                detail,
            }
        })
        .collect();

    output::print_list(&rows, OutputFormat::Table);

    if !report.has_failures() {
        output::print_success(&format!(
            "Uninstalled '{}' ({} resource(s) removed)",
            report.plugin,
            report.total_removed()
        ));
    } else {
        output::print_warning("Some resources could not be removed");
    }
}
