//! bumpkin - version bumping across single- and multi-module repositories
//!
//! The core is a workspace engine: discover modules under a root, resolve which
//! of them an invocation targets, run an operation across them sequentially or
//! concurrently, and aggregate the per-module outcomes.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): models, errors and the `Operation` / `ModuleSelector` ports
//! - **Service Layer** (`services`): discovery, context resolution, the executor and operations
//! - **Infrastructure Layer** (`infrastructure`): configuration, logging and version file I/O
//! - **CLI Layer** (`cli`): command-line interface and output formatting
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use bumpkin::services::operations::ShowOperation;
//! use bumpkin::{Config, Detector, ExecutorOptions, ModuleExecutor};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let modules = Detector::new(Config::default()).discover(std::path::Path::new("."))?;
//! let executor = ModuleExecutor::new(ExecutorOptions::new().with_parallel(true));
//! let report = executor
//!     .run(&CancellationToken::new(), &modules, Arc::new(ShowOperation))
//!     .await;
//! println!("{} result(s)", report.results.len());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

pub use domain::models::{
    BumpKind, Config, DetectedContext, DiscoveryConfig, ExecutionEvent, ExecutionResult,
    ExecutorOptions, LoggingConfig, Module, ModuleConfig, RunReport, TaskState, WorkspaceConfig,
    WorkspaceMode,
};
pub use domain::ports::{ModuleSelector, Operation};
pub use domain::{DiscoveryError, OperationError, RunError, SelectionError};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{ContextResolver, DefaultSelection, Detector, ModuleExecutor, Resolution, Selectors};
