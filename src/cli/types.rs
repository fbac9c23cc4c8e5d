//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::cli::commands::bump::BumpArgs;
use crate::cli::commands::doctor::DoctorArgs;
use crate::cli::commands::modules::ModulesCommands;
use crate::cli::commands::set::SetArgs;
use crate::cli::commands::show::ShowArgs;
use crate::cli::output::OutputFormat;
use crate::domain::models::ExecutorOptions;
use crate::services::Selectors;

#[derive(Parser, Debug)]
#[command(name = "bumpkin")]
#[command(about = "Show, set and bump versions across one or many modules", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to .bumpkin.yaml in the working directory)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the current version of each module
    Show(ShowArgs),

    /// Set an explicit version on each module
    Set(SetArgs),

    /// Bump the version of each module
    Bump(BumpArgs),

    /// Check that every targeted version file is valid
    Doctor(DoctorArgs),

    /// Inspect the workspace
    #[command(subcommand)]
    Modules(ModulesCommands),
}

/// Selection, scheduling and output flags shared by the per-module commands.
#[derive(Args, Debug, Clone)]
pub struct MultiModuleArgs {
    /// Operate on this version file only, skipping discovery
    #[arg(short, long, value_name = "FILE")]
    pub path: Option<PathBuf>,

    /// Operate on all discovered modules
    #[arg(short, long)]
    pub all: bool,

    /// Operate on a named module (repeatable)
    #[arg(short, long = "module", value_name = "NAME")]
    pub module: Vec<String>,

    /// Operate on a comma-separated list of modules
    #[arg(long, value_name = "NAMES", value_delimiter = ',')]
    pub modules: Vec<String>,

    /// Operate on modules whose name or directory matches a glob
    #[arg(long, value_name = "GLOB")]
    pub pattern: Option<String>,

    /// Skip the interactive prompt and select all modules
    #[arg(short, long)]
    pub yes: bool,

    /// Never prompt
    #[arg(long)]
    pub non_interactive: bool,

    /// Run modules concurrently
    #[arg(long)]
    pub parallel: bool,

    /// Stop after the first failing module
    #[arg(
        long,
        value_name = "BOOL",
        default_value_t = true,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub fail_fast: bool,

    /// Run every module even when some fail (overrides --fail-fast)
    #[arg(long)]
    pub continue_on_error: bool,

    /// Maximum number of modules processed at once with --parallel
    #[arg(long, value_name = "N")]
    pub max_concurrency: Option<NonZeroUsize>,

    /// Print only a one-line summary
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format: text, json or table
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub format: OutputFormat,
}

impl MultiModuleArgs {
    pub fn selectors(&self) -> Selectors {
        Selectors {
            path: self.path.clone(),
            all: self.all,
            modules: self.module.iter().chain(&self.modules).cloned().collect(),
            pattern: self.pattern.clone(),
            yes: self.yes,
            non_interactive: self.non_interactive,
        }
    }

    pub fn executor_options(&self) -> ExecutorOptions {
        ExecutorOptions::new()
            .with_parallel(self.parallel)
            .with_fail_fast(self.fail_fast)
            .with_continue_on_error(self.continue_on_error)
            .with_max_concurrency(self.max_concurrency.map(NonZeroUsize::get))
    }
}
