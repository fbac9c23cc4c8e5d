//! Command-line interface.

pub mod commands;
pub mod output;
pub mod prompt;
pub mod types;

use std::process::ExitCode;

use anyhow::Result;
use console::style;
use thiserror::Error;

pub use commands::CommandContext;
pub use types::{Cli, Commands, MultiModuleArgs};

/// Errors raised by the CLI layer itself.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    #[error("{failed} of {total} module(s) failed")]
    ModulesFailed { failed: usize, total: usize },
}

/// Dispatch a parsed command.
pub async fn run(command: Commands, ctx: &CommandContext) -> Result<()> {
    match command {
        Commands::Show(args) => commands::show::execute(args, ctx).await,
        Commands::Set(args) => commands::set::execute(args, ctx).await,
        Commands::Bump(args) => commands::bump::execute(args, ctx).await,
        Commands::Doctor(args) => commands::doctor::execute(args, ctx).await,
        Commands::Modules(command) => commands::modules::execute(command, ctx).await,
    }
}

/// Print an error chain to stderr and pick the process exit code.
pub fn handle_error(err: &anyhow::Error) -> ExitCode {
    eprintln!("{} {err:#}", style("Error:").red().bold());
    ExitCode::FAILURE
}
