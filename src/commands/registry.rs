//! Managed resource registry listing.

use serde::Serialize;
use tabled::Tabled;

use straico_core::registry;
use straico_core::result::AppResult;

use crate::output::{self, OutputFormat};

#[derive(Debug, Serialize, Tabled)]
struct RegistryRow {
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Identifier")]
    identifier: &'static str,
    #[tabled(rename = "Owner")]
    owner: &'static str,
}

/// Execute the registry command
pub fn execute(format: OutputFormat) -> AppResult<()> {
    registry::validate(registry::entries())?;

    let rows: Vec<RegistryRow> = registry::entries()
        .iter()
        .map(|entry| RegistryRow {
            kind: entry.kind.to_string(),
            identifier: entry.identifier,
            owner: entry.owner,
        })
        .collect();

    output::print_list(&rows, format);
    Ok(())
}
