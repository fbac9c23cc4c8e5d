//! Per-module execution results and executor options.

use std::time::Duration;

use serde_json::Value;

use super::module::Module;
use crate::domain::errors::RunError;

/// Terminal state of one module's task.
///
/// A module with no result was never attempted, and one between
/// [`ExecutionEvent::ModuleStarted`] and [`ExecutionEvent::ModuleFinished`] is
/// running. Tasks are never retried, so these are the only outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Succeeded,
    Failed,
}

/// Outcome of running an operation against one selected module.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionResult {
    pub module: Module,
    pub success: bool,
    pub error: Option<String>,
    /// Operation-defined payload, opaque to the engine.
    pub data: Option<Value>,
    pub duration: Duration,
}

impl ExecutionResult {
    pub fn succeeded(module: Module, data: Option<Value>, duration: Duration) -> Self {
        Self {
            module,
            success: true,
            error: None,
            data,
            duration,
        }
    }

    pub fn failed(module: Module, error: impl Into<String>, duration: Duration) -> Self {
        Self {
            module,
            success: false,
            error: Some(error.into()),
            data: None,
            duration,
        }
    }

    pub const fn state(&self) -> TaskState {
        if self.success {
            TaskState::Succeeded
        } else {
            TaskState::Failed
        }
    }
}

/// Options controlling how the executor schedules and stops.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutorOptions {
    /// Run one concurrent task per module instead of strictly in order.
    pub parallel: bool,
    /// Stop starting new modules after the first failure.
    pub fail_fast: bool,
    /// Forces `fail_fast` off regardless of its value.
    pub continue_on_error: bool,
    /// Cap on simultaneously running modules in parallel mode; `None` is unbounded.
    pub max_concurrency: Option<usize>,
}

impl ExecutorOptions {
    pub fn new() -> Self {
        Self {
            fail_fast: true,
            ..Self::default()
        }
    }

    pub const fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub const fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    pub const fn with_continue_on_error(mut self, continue_on_error: bool) -> Self {
        self.continue_on_error = continue_on_error;
        self
    }

    pub const fn with_max_concurrency(mut self, max: Option<usize>) -> Self {
        self.max_concurrency = max;
        self
    }

    /// Fail-fast after applying the continue-on-error override.
    pub const fn effective_fail_fast(&self) -> bool {
        self.fail_fast && !self.continue_on_error
    }
}

/// What an executor run produced.
///
/// `results` is in target order. When `stopped` is set the list may be partial:
/// every result present is trustworthy and a missing module was never attempted.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub results: Vec<ExecutionResult>,
    pub stopped: Option<RunError>,
}

impl RunReport {
    /// Split into results and the run-level error, mirroring `(results, err)`.
    pub fn into_parts(self) -> (Vec<ExecutionResult>, Option<RunError>) {
        (self.results, self.stopped)
    }
}

/// Progress notifications emitted while a run is in flight.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionEvent {
    Started { total: usize, parallel: bool },
    ModuleStarted { index: usize, name: String },
    ModuleFinished { index: usize, name: String, state: TaskState },
    Completed { succeeded: usize, failed: usize, stopped: Option<RunError> },
}
