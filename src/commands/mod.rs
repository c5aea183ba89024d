//! CLI command definitions and dispatch.

pub mod activate;
pub mod option;
pub mod registry;
pub mod run;
pub mod status;
pub mod uninstall;

use clap::{Parser, Subcommand};

use straico_core::config::AppConfig;
use straico_core::result::AppResult;
use straico_host::Host;

use crate::output::OutputFormat;

/// Straico plugin host
#[derive(Debug, Parser)]
#[command(name = "straico", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Activate the plugin (create its tables)
    Activate,
    /// Remove the plugin and everything it stored
    Uninstall(uninstall::UninstallArgs),
    /// List every resource the plugin may create
    Registry,
    /// Show which registered resources exist right now
    Status,
    /// Read or change plugin options
    Option(option::OptionArgs),
    /// Schedule the plugin jobs and run them until interrupted
    Run,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> AppResult<()> {
        match &self.command {
            Commands::Registry => registry::execute(self.format),
            Commands::Activate => activate::execute(&open_host(config).await?).await,
            Commands::Uninstall(args) => {
                uninstall::execute(args, &open_host(config).await?, self.format).await
            }
            Commands::Status => status::execute(&open_host(config).await?, self.format).await,
            Commands::Option(args) => {
                option::execute(args, &open_host(config).await?, self.format).await
            }
            Commands::Run => run::execute(&open_host(config).await?).await,
        }
    }
}

/// Helper: connect to the host database and wire the capabilities
async fn open_host(config: AppConfig) -> AppResult<Host> {
    Host::open(config).await
}
