//! Plugin activation command.

use straico_core::result::AppResult;
use straico_host::Host;

use crate::output;

/// Execute the activate command
pub async fn execute(host: &Host) -> AppResult<()> {
    host.installer().install().await?;

    output::print_success(&format!(
        "Activated '{}' (tables: {})",
        host.config().plugin.identifier,
        host.capabilities().schema.tables().join(", ")
    ));
    host.close().await;
    Ok(())
}
