//! Live status of the registered resources.

use serde::Serialize;
use tabled::Tabled;

use straico_core::result::AppResult;
use straico_host::Host;

use crate::output::{self, OutputFormat};

#[derive(Debug, Serialize, Tabled)]
struct StatusRow {
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Identifier")]
    identifier: &'static str,
    #[tabled(rename = "Present")]
    present: &'static str,
}

/// Execute the status command
pub async fn execute(host: &Host, format: OutputFormat) -> AppResult<()> {
    let states = host.inventory().await?;

    match format {
        OutputFormat::Json => output::print_json(&states, "[]"),
        OutputFormat::Table => {
            let rows: Vec<StatusRow> = states
                .iter()
                .map(|s| StatusRow {
                    kind: s.kind.to_string(),
                    identifier: s.identifier,
                    present: if s.present { "yes" } else { "-" },
                })
                .collect();
            output::print_list(&rows, format);

            let upload_root = host
                .config()
                .storage
                .upload_root
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(none)".to_string());
            println!();
            output::print_kv("Plugin", &host.config().plugin.identifier);
            output::print_kv("Database", &host.config().database.url);
            output::print_kv("Upload root", &upload_root);
        }
    }

    host.close().await;
    Ok(())
}
