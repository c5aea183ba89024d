//! Plugin option management commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use straico_core::error::AppError;
use straico_core::registry::{self, ResourceKind};
use straico_core::result::AppResult;
use straico_core::traits::KeyValueStore;
use straico_host::Host;

use crate::output::{self, OutputFormat};

/// Arguments for the option command
#[derive(Debug, Args)]
pub struct OptionArgs {
    /// Option subcommand
    #[command(subcommand)]
    pub command: OptionCommand,
}

/// Option subcommands
#[derive(Debug, Subcommand)]
pub enum OptionCommand {
    /// List plugin options and their values
    List,
    /// Print one option
    Get {
        /// Option name
        name: String,
    },
    /// Set one option
    Set {
        /// Option name
        name: String,
        /// New value
        value: String,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct OptionRow {
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

/// Execute option commands
pub async fn execute(args: &OptionArgs, host: &Host, format: OutputFormat) -> AppResult<()> {
    let options = host.options();

    match &args.command {
        OptionCommand::List => {
            let mut rows = Vec::new();
            for name in registry::identifiers(ResourceKind::Option) {
                let value = options.get(name).await?.map(|v| display_value(name, &v));
                rows.push(OptionRow {
                    name,
                    value: value.unwrap_or_else(|| "-".to_string()),
                });
            }
            output::print_list(&rows, format);
        }
        OptionCommand::Get { name } => {
            let name = plugin_option(name)?;
            match options.get(name).await? {
                Some(value) => println!("{}", value),
                None => {
                    return Err(AppError::not_found(format!("Option '{}' is not set", name)));
                }
            }
        }
        OptionCommand::Set { name, value } => {
            let name = plugin_option(name)?;
            options.set(name, value).await?;
            output::print_success(&format!("Set {}", name));
        }
    }

    host.close().await;
    Ok(())
}

/// Only options the plugin registered can be read or written here.
fn plugin_option(name: &str) -> AppResult<&'static str> {
    registry::identifiers(ResourceKind::Option)
        .into_iter()
        .find(|known| *known == name)
        .ok_or_else(|| AppError::validation(format!("'{}' is not a plugin option", name)))
}

fn display_value(name: &str, value: &str) -> String {
    if name == registry::OPTION_API_KEY && !value.is_empty() {
        "********".to_string()
    } else {
        value.to_string()
    }
}
