//! Shared flow for per-module commands: resolve targets, run, render.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::cli::output::{describe_result, OutputFormat};
use crate::cli::prompt::TerminalSelector;
use crate::cli::types::MultiModuleArgs;
use crate::cli::CliError;
use crate::domain::errors::RunError;
use crate::domain::models::{Config, DetectedContext, ExecutionResult, Module};
use crate::domain::ports::Operation;
use crate::services::aggregate::{error_count, has_errors, quiet_summary};
use crate::services::{ContextResolver, DefaultSelection, Detector, ModuleExecutor, Resolution};

/// Everything a command needs besides its own arguments.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub config: Config,
    /// Workspace root, normally the working directory.
    pub root: PathBuf,
    pub cancel: CancellationToken,
}

impl CommandContext {
    pub fn new(config: Config, root: impl Into<PathBuf>, cancel: CancellationToken) -> Self {
        Self {
            config,
            root: root.into(),
            cancel,
        }
    }

    pub fn detector(&self) -> Detector {
        Detector::new(self.config.clone()).with_cancellation(self.cancel.clone())
    }
}

/// Where a command will operate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// One version file, handled without the executor.
    Single(PathBuf),
    /// Executor targets, in discovery order.
    Modules(Vec<Module>),
}

/// Resolve the invocation's target from flags, configuration and discovery.
pub fn resolve_target(
    ctx: &CommandContext,
    args: &MultiModuleArgs,
    default: DefaultSelection,
) -> Result<Target> {
    let mut selectors = args.selectors();
    if selectors.path.is_none() {
        selectors.path = ctx.config.explicit_path();
    }
    if let Some(path) = selectors.path {
        debug!(path = %path.display(), "operating on explicit version file");
        return Ok(Target::Single(path));
    }

    let detected = ctx.detector().detect_context(&ctx.root)?;
    info!(mode = %detected.mode(), modules = detected.modules().len(), "workspace detected");
    if detected == DetectedContext::Empty {
        let legacy = ctx.root.join(&ctx.config.path);
        debug!(path = %legacy.display(), "no modules discovered, using configured path");
        return Ok(Target::Single(legacy));
    }

    let prompt = TerminalSelector::new();
    let resolver = ContextResolver::new(default).with_prompt(&prompt);
    Ok(match resolver.resolve(&selectors, &detected)? {
        Resolution::Single(path) => Target::Single(path),
        Resolution::Targets(modules) => Target::Modules(modules),
    })
}

/// Resolve targets and run `operation` against them, printing the outcome.
///
/// Returns an error when any module failed or the run stopped early, after
/// every produced result has been printed.
pub async fn run_operation(
    ctx: &CommandContext,
    args: &MultiModuleArgs,
    operation: Arc<dyn Operation>,
    default: DefaultSelection,
) -> Result<()> {
    match resolve_target(ctx, args, default)? {
        Target::Single(path) => run_single(ctx, args, path, operation.as_ref()).await,
        Target::Modules(modules) => run_multi(ctx, args, &modules, operation).await,
    }
}

async fn run_single(
    ctx: &CommandContext,
    args: &MultiModuleArgs,
    path: PathBuf,
    operation: &dyn Operation,
) -> Result<()> {
    let module = Module::from_version_path(&path);
    let started = std::time::Instant::now();
    let outcome = operation.execute(&ctx.cancel, &module).await;
    let elapsed = started.elapsed();

    if args.format == OutputFormat::Text {
        let data = outcome?;
        let result = ExecutionResult::succeeded(module, data, elapsed);
        println!("{}", describe_result(&result));
        return Ok(());
    }

    let result = match outcome {
        Ok(data) => ExecutionResult::succeeded(module, data, elapsed),
        Err(e) => ExecutionResult::failed(module, e.to_string(), elapsed),
    };
    let results = [result];
    print_results(args, &results, operation);
    finish(&results, None)
}

async fn run_multi(
    ctx: &CommandContext,
    args: &MultiModuleArgs,
    modules: &[Module],
    operation: Arc<dyn Operation>,
) -> Result<()> {
    let executor = ModuleExecutor::new(args.executor_options());
    let (results, stopped) = executor
        .run(&ctx.cancel, modules, Arc::clone(&operation))
        .await
        .into_parts();

    print_results(args, &results, operation.as_ref());
    finish(&results, stopped.as_ref())
}

fn print_results(args: &MultiModuleArgs, results: &[ExecutionResult], operation: &dyn Operation) {
    if args.quiet {
        println!("{}", quiet_summary(results, operation.verb()));
        return;
    }
    let title = title_for(operation, results.len());
    println!(
        "{}",
        args.format.formatter().format(results, &title, operation.verb())
    );
}

fn finish(results: &[ExecutionResult], stopped: Option<&RunError>) -> Result<()> {
    if let Some(stopped) = stopped {
        return Err(stopped.clone().into());
    }
    if has_errors(results) {
        return Err(CliError::ModulesFailed {
            failed: error_count(results),
            total: results.len(),
        }
        .into());
    }
    Ok(())
}

fn title_for(operation: &dyn Operation, count: usize) -> String {
    let name = operation.name();
    let mut chars = name.chars();
    let capitalized = chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect::<String>())
        .unwrap_or_default();
    format!("{capitalized} ({count} module(s))")
}
