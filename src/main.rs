//! bumpkin CLI entry point.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use bumpkin::cli::{self, Cli, CommandContext};
use bumpkin::infrastructure::config::ConfigLoader;
use bumpkin::infrastructure::logging::LoggerImpl;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => cli::handle_error(&err),
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = ConfigLoader::load(cli.config.as_deref())?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    let _logger = LoggerImpl::init(&config.logging)?;

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, cancelling");
            interrupt.cancel();
        }
    });

    let root = std::env::current_dir().context("Failed to determine working directory")?;
    let ctx = CommandContext::new(config, root, cancel);
    cli::run(cli.command, &ctx).await
}
