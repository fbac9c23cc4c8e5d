//! Domain errors for the bumpkin workspace engine.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while locating modules under a workspace root.
///
/// Always fatal: they are reported before any module work begins.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Cannot read workspace root {path}: {source}")]
    UnreadableRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid max_depth: {0}. Must be zero or greater")]
    InvalidMaxDepth(i32),

    #[error("Duplicate module name in workspace configuration: {0}")]
    DuplicateModuleName(String),

    #[error("Module {name}: version file not found at {path}")]
    ModulePathNotFound { name: String, path: PathBuf },

    #[error("Cannot read ignore file {path}: {source}")]
    IgnoreFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid exclude pattern {pattern:?}: {reason}")]
    InvalidExcludePattern { pattern: String, reason: String },

    #[error("Discovery cancelled")]
    Cancelled,
}

/// Errors raised while narrowing discovered modules down to the invocation's targets.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("No modules found in workspace")]
    NoModulesFound,

    #[error("Module {0:?} not found")]
    ModuleNotFound(String),

    #[error("Invalid pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("No modules found matching pattern: {0}")]
    NoPatternMatch(String),

    #[error("No modules selected")]
    NothingSelected,

    #[error("Module selection aborted: {0}")]
    PromptFailed(String),
}

/// Failure of a single module's operation.
///
/// Captured into that module's `ExecutionResult`; never a process-level failure on its own.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("Failed to read version from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write version to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid version {input:?}: {reason}")]
    InvalidVersion { input: String, reason: String },

    #[error("Invalid version file at {path}: {reason}")]
    InvalidVersionFile { path: PathBuf, reason: String },

    #[error("Operation cancelled")]
    Cancelled,

    #[error("{0}")]
    Failed(String),
}

/// Why an executor run returned before every targeted module produced a result.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RunError {
    #[error("Execution stopped after module {module:?} failed ({not_attempted} not attempted)")]
    Aborted { module: String, not_attempted: usize },

    #[error("Execution cancelled ({not_attempted} module(s) not attempted)")]
    Cancelled { not_attempted: usize },
}
