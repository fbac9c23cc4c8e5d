//! Concurrent executor: applies one operation across selected modules.
//!
//! Sequential runs walk targets in order. Parallel runs spawn one task per
//! module (optionally bounded by a semaphore) and write each result into its
//! target slot, so the returned list is always in target order.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use futures::FutureExt;
use tokio::sync::{mpsc, Mutex, Semaphore};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::domain::errors::RunError;
use crate::domain::models::{ExecutionEvent, ExecutionResult, ExecutorOptions, Module, RunReport};
use crate::domain::ports::Operation;

/// Optional progress channel; sends never block and a dropped receiver is ignored.
#[derive(Clone, Default)]
struct Emitter(Option<mpsc::UnboundedSender<ExecutionEvent>>);

impl Emitter {
    fn emit(&self, event: ExecutionEvent) {
        if let Some(tx) = &self.0 {
            let _ = tx.send(event);
        }
    }
}

/// Shared state of a parallel run, guarded by a single lock.
struct Collector {
    slots: Vec<Option<ExecutionResult>>,
    first_failure: Option<String>,
}

/// Runs an [`Operation`] over modules according to [`ExecutorOptions`].
#[derive(Debug, Clone)]
pub struct ModuleExecutor {
    options: ExecutorOptions,
}

impl ModuleExecutor {
    pub const fn new(options: ExecutorOptions) -> Self {
        Self { options }
    }

    /// Run `operation` against every module.
    pub async fn run(
        &self,
        cancel: &CancellationToken,
        modules: &[Module],
        operation: Arc<dyn Operation>,
    ) -> RunReport {
        self.run_with_events(cancel, modules, operation, None).await
    }

    /// Run with progress events streamed to `events`.
    pub async fn run_with_events(
        &self,
        cancel: &CancellationToken,
        modules: &[Module],
        operation: Arc<dyn Operation>,
        events: Option<mpsc::UnboundedSender<ExecutionEvent>>,
    ) -> RunReport {
        let emitter = Emitter(events);
        let fail_fast = self.options.effective_fail_fast();
        info!(
            operation = %operation.name(),
            modules = modules.len(),
            parallel = self.options.parallel,
            fail_fast,
            "starting module run"
        );
        emitter.emit(ExecutionEvent::Started {
            total: modules.len(),
            parallel: self.options.parallel,
        });

        let report = if self.options.parallel {
            self.run_parallel(cancel, modules, operation, fail_fast, &emitter)
                .await
        } else {
            run_sequential(cancel, modules, operation.as_ref(), fail_fast, &emitter).await
        };

        let succeeded = report.results.iter().filter(|r| r.success).count();
        let failed = report.results.len() - succeeded;
        info!(succeeded, failed, stopped = ?report.stopped, "module run finished");
        emitter.emit(ExecutionEvent::Completed {
            succeeded,
            failed,
            stopped: report.stopped.clone(),
        });
        report
    }

    async fn run_parallel(
        &self,
        cancel: &CancellationToken,
        modules: &[Module],
        operation: Arc<dyn Operation>,
        fail_fast: bool,
        emitter: &Emitter,
    ) -> RunReport {
        let total = modules.len();
        let run_token = cancel.child_token();
        let semaphore = self
            .options
            .max_concurrency
            .map(|max| Arc::new(Semaphore::new(max.max(1))));
        let collector = Arc::new(Mutex::new(Collector {
            slots: vec![None; total],
            first_failure: None,
        }));

        let mut tasks = JoinSet::new();
        for (index, module) in modules.iter().cloned().enumerate() {
            if run_token.is_cancelled() {
                break;
            }
            let token = run_token.clone();
            let semaphore = semaphore.clone();
            let collector = Arc::clone(&collector);
            let operation = Arc::clone(&operation);
            let emitter = emitter.clone();

            tasks.spawn(async move {
                let _permit = match semaphore {
                    Some(semaphore) => tokio::select! {
                        biased;
                        () = token.cancelled() => return,
                        permit = semaphore.acquire_owned() => permit.ok(),
                    },
                    None => None,
                };
                if token.is_cancelled() {
                    debug!(module = %module.name, "skipping module, run cancelled");
                    return;
                }

                let result = execute_one(index, module, operation.as_ref(), &token, &emitter).await;

                let mut collector = collector.lock().await;
                if !result.success && fail_fast {
                    if collector.first_failure.is_none() {
                        collector.first_failure = Some(result.module.name.clone());
                    }
                    token.cancel();
                }
                collector.slots[index] = Some(result);
            });
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                warn!(error = %e, "module task did not complete");
            }
        }

        let mut collector = collector.lock().await;
        let results: Vec<ExecutionResult> = collector.slots.drain(..).flatten().collect();
        let not_attempted = total - results.len();
        let stopped = if cancel.is_cancelled() {
            Some(RunError::Cancelled { not_attempted })
        } else {
            collector
                .first_failure
                .take()
                .map(|module| RunError::Aborted {
                    module,
                    not_attempted,
                })
        };
        RunReport { results, stopped }
    }
}

async fn run_sequential(
    cancel: &CancellationToken,
    modules: &[Module],
    operation: &dyn Operation,
    fail_fast: bool,
    emitter: &Emitter,
) -> RunReport {
    let total = modules.len();
    let mut results = Vec::with_capacity(total);

    for (index, module) in modules.iter().enumerate() {
        if cancel.is_cancelled() {
            return RunReport {
                results,
                stopped: Some(RunError::Cancelled {
                    not_attempted: total - index,
                }),
            };
        }

        let result = execute_one(index, module.clone(), operation, cancel, emitter).await;
        let failed = !result.success;
        results.push(result);

        if failed && fail_fast {
            let not_attempted = total - index - 1;
            let stopped = if cancel.is_cancelled() {
                RunError::Cancelled { not_attempted }
            } else {
                RunError::Aborted {
                    module: module.name.clone(),
                    not_attempted,
                }
            };
            return RunReport {
                results,
                stopped: Some(stopped),
            };
        }
    }

    let stopped = cancel
        .is_cancelled()
        .then_some(RunError::Cancelled { not_attempted: 0 });
    RunReport { results, stopped }
}

/// Run the operation for one module, turning errors and panics into a failed result.
async fn execute_one(
    index: usize,
    module: Module,
    operation: &dyn Operation,
    cancel: &CancellationToken,
    emitter: &Emitter,
) -> ExecutionResult {
    emitter.emit(ExecutionEvent::ModuleStarted {
        index,
        name: module.name.clone(),
    });
    debug!(module = %module.name, path = %module.path.display(), "running module");

    let started = Instant::now();
    let outcome = AssertUnwindSafe(operation.execute(cancel, &module))
        .catch_unwind()
        .await;
    let elapsed = started.elapsed();

    let result = match outcome {
        Ok(Ok(data)) => ExecutionResult::succeeded(module, data, elapsed),
        Ok(Err(e)) => {
            debug!(module = %module.name, error = %e, "module failed");
            ExecutionResult::failed(module, e.to_string(), elapsed)
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            warn!(module = %module.name, panic = %message, "operation panicked");
            ExecutionResult::failed(module, format!("operation panicked: {message}"), elapsed)
        }
    };

    emitter.emit(ExecutionEvent::ModuleFinished {
        index,
        name: result.module.name.clone(),
        state: result.state(),
    });
    result
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::OperationError;
    use crate::domain::models::TaskState;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Clone, Copy, Default)]
    struct Behaviour {
        delay_ms: u64,
        fail: bool,
        panic: bool,
        wait_for_cancel: bool,
    }

    #[derive(Default)]
    struct ScriptedOperation {
        behaviour: HashMap<String, Behaviour>,
        executed: std::sync::Mutex<Vec<String>>,
        running: AtomicUsize,
        peak: AtomicUsize,
    }

    impl ScriptedOperation {
        fn with(mut self, name: &str, behaviour: Behaviour) -> Self {
            self.behaviour.insert(name.to_string(), behaviour);
            self
        }

        fn executed(&self) -> Vec<String> {
            self.executed.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Operation for ScriptedOperation {
        fn name(&self) -> String {
            "scripted".to_string()
        }

        async fn execute(
            &self,
            cancel: &CancellationToken,
            module: &Module,
        ) -> Result<Option<Value>, OperationError> {
            self.executed.lock().unwrap().push(module.name.clone());
            let now = self.running.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);

            let behaviour = self.behaviour.get(&module.name).copied().unwrap_or_default();
            let outcome = async {
                if behaviour.wait_for_cancel {
                    tokio::select! {
                        () = cancel.cancelled() => return Err(OperationError::Cancelled),
                        () = tokio::time::sleep(Duration::from_secs(10)) => {}
                    }
                }
                tokio::time::sleep(Duration::from_millis(behaviour.delay_ms)).await;
                if behaviour.panic {
                    panic!("scripted panic in {}", module.name);
                }
                if behaviour.fail {
                    return Err(OperationError::Failed(format!("{} failed", module.name)));
                }
                Ok(Some(json!({ "module": module.name })))
            }
            .await;

            self.running.fetch_sub(1, Ordering::SeqCst);
            outcome
        }
    }

    fn modules(names: &[&str]) -> Vec<Module> {
        names
            .iter()
            .map(|name| {
                Module::new(
                    *name,
                    format!("/repo/{name}/.version"),
                    format!("{name}/.version"),
                    "1.0.0",
                )
            })
            .collect()
    }

    fn names(report: &RunReport) -> Vec<String> {
        report.results.iter().map(|r| r.module.name.clone()).collect()
    }

    fn failing() -> Behaviour {
        Behaviour {
            fail: true,
            ..Behaviour::default()
        }
    }

    #[tokio::test]
    async fn test_sequential_runs_in_order() {
        let op = Arc::new(ScriptedOperation::default());
        let executor = ModuleExecutor::new(ExecutorOptions::new());
        let report = executor
            .run(&CancellationToken::new(), &modules(&["a", "b", "c"]), op.clone())
            .await;

        assert_eq!(names(&report), vec!["a", "b", "c"]);
        assert_eq!(op.executed(), vec!["a", "b", "c"]);
        assert!(report.stopped.is_none());
        assert_eq!(report.results[1].data, Some(json!({ "module": "b" })));
    }

    #[tokio::test]
    async fn test_parallel_preserves_target_order() {
        let op = ScriptedOperation::default()
            .with("a", Behaviour { delay_ms: 60, ..Behaviour::default() })
            .with("b", Behaviour { delay_ms: 30, ..Behaviour::default() })
            .with("c", Behaviour { delay_ms: 0, ..Behaviour::default() });
        let executor = ModuleExecutor::new(ExecutorOptions::new().with_parallel(true));
        let report = executor
            .run(&CancellationToken::new(), &modules(&["a", "b", "c"]), Arc::new(op))
            .await;

        assert_eq!(names(&report), vec!["a", "b", "c"]);
        assert!(report.results.iter().all(|r| r.success));
    }

    #[tokio::test]
    async fn test_sequential_fail_fast_is_partial() {
        let op = Arc::new(ScriptedOperation::default().with("b", failing()));
        let executor = ModuleExecutor::new(ExecutorOptions::new());
        let report = executor
            .run(&CancellationToken::new(), &modules(&["a", "b", "c", "d"]), op.clone())
            .await;

        assert_eq!(names(&report), vec!["a", "b"]);
        assert_eq!(op.executed(), vec!["a", "b"]);
        assert_eq!(
            report.stopped,
            Some(RunError::Aborted {
                module: "b".into(),
                not_attempted: 2
            })
        );
    }

    #[tokio::test]
    async fn test_continue_on_error_runs_everything() {
        for parallel in [false, true] {
            let op = ScriptedOperation::default()
                .with("a", failing())
                .with("c", failing());
            let executor = ModuleExecutor::new(
                ExecutorOptions::new()
                    .with_parallel(parallel)
                    .with_continue_on_error(true),
            );
            let report = executor
                .run(&CancellationToken::new(), &modules(&["a", "b", "c", "d"]), Arc::new(op))
                .await;

            assert_eq!(report.results.len(), 4);
            assert!(report.stopped.is_none());
            let states: Vec<_> = report.results.iter().map(ExecutionResult::state).collect();
            assert_eq!(
                states,
                vec![
                    TaskState::Failed,
                    TaskState::Succeeded,
                    TaskState::Failed,
                    TaskState::Succeeded
                ]
            );
        }
    }

    #[tokio::test]
    async fn test_parallel_fail_fast_cancels_siblings() {
        let waiting = Behaviour {
            wait_for_cancel: true,
            ..Behaviour::default()
        };
        let op = ScriptedOperation::default()
            .with("a", failing())
            .with("b", waiting)
            .with("c", waiting)
            .with("d", waiting);
        let executor = ModuleExecutor::new(ExecutorOptions::new().with_parallel(true));

        let started = Instant::now();
        let report = executor
            .run(&CancellationToken::new(), &modules(&["a", "b", "c", "d"]), Arc::new(op))
            .await;

        assert!(started.elapsed() < Duration::from_secs(5));
        match report.stopped {
            Some(RunError::Aborted { ref module, not_attempted }) => {
                assert_eq!(module, "a");
                assert_eq!(not_attempted, 4 - report.results.len());
            }
            ref other => panic!("expected abort, got {other:?}"),
        }
        assert_eq!(report.results[0].module.name, "a");
        assert!(report.results.iter().all(|r| !r.success));
    }

    #[tokio::test]
    async fn test_pre_cancelled_context_starts_nothing() {
        for parallel in [false, true] {
            let op = Arc::new(ScriptedOperation::default());
            let cancel = CancellationToken::new();
            cancel.cancel();
            let executor = ModuleExecutor::new(ExecutorOptions::new().with_parallel(parallel));
            let report = executor.run(&cancel, &modules(&["a", "b"]), op.clone()).await;

            assert!(report.results.is_empty());
            assert_eq!(report.stopped, Some(RunError::Cancelled { not_attempted: 2 }));
            assert!(op.executed().is_empty());
        }
    }

    #[tokio::test]
    async fn test_external_cancel_mid_run() {
        let op = Arc::new(
            ScriptedOperation::default().with("a", Behaviour { delay_ms: 50, ..Behaviour::default() }),
        );
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            trigger.cancel();
        });

        let executor = ModuleExecutor::new(ExecutorOptions::new());
        let report = executor.run(&cancel, &modules(&["a", "b", "c"]), op.clone()).await;

        assert_eq!(names(&report), vec!["a"]);
        assert_eq!(report.stopped, Some(RunError::Cancelled { not_attempted: 2 }));
        assert_eq!(op.executed(), vec!["a"]);
    }

    #[tokio::test]
    async fn test_sequential_cancel_while_module_waits_on_token() {
        let waiting = Behaviour {
            wait_for_cancel: true,
            ..Behaviour::default()
        };
        let op = Arc::new(ScriptedOperation::default().with("a", waiting));
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let executor = ModuleExecutor::new(ExecutorOptions::new());
        let report = executor.run(&cancel, &modules(&["a", "b", "c"]), op.clone()).await;

        assert_eq!(names(&report), vec!["a"]);
        assert!(!report.results[0].success);
        assert_eq!(report.stopped, Some(RunError::Cancelled { not_attempted: 2 }));
        assert_eq!(op.executed(), vec!["a"]);
    }

    #[tokio::test]
    async fn test_panic_becomes_failure() {
        let op = ScriptedOperation::default().with(
            "b",
            Behaviour {
                panic: true,
                ..Behaviour::default()
            },
        );
        let executor = ModuleExecutor::new(
            ExecutorOptions::new()
                .with_parallel(true)
                .with_continue_on_error(true),
        );
        let report = executor
            .run(&CancellationToken::new(), &modules(&["a", "b", "c"]), Arc::new(op))
            .await;

        assert_eq!(report.results.len(), 3);
        let error = report.results[1].error.as_deref().unwrap();
        assert!(error.contains("panicked"), "{error}");
        assert!(error.contains("scripted panic in b"), "{error}");
    }

    #[tokio::test]
    async fn test_max_concurrency_is_respected() {
        let mut op = ScriptedOperation::default();
        let names = ["a", "b", "c", "d", "e", "f"];
        for name in names {
            op = op.with(name, Behaviour { delay_ms: 20, ..Behaviour::default() });
        }
        let op = Arc::new(op);
        let executor = ModuleExecutor::new(
            ExecutorOptions::new()
                .with_parallel(true)
                .with_max_concurrency(Some(2)),
        );
        let report = executor
            .run(&CancellationToken::new(), &modules(&names), op.clone())
            .await;

        assert_eq!(report.results.len(), 6);
        assert!(op.peak.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn test_events_bracket_the_run() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let op = Arc::new(ScriptedOperation::default().with("b", failing()));
        let executor = ModuleExecutor::new(ExecutorOptions::new().with_continue_on_error(true));
        executor
            .run_with_events(&CancellationToken::new(), &modules(&["a", "b"]), op, Some(tx))
            .await;

        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        assert_eq!(
            events.first(),
            Some(&ExecutionEvent::Started {
                total: 2,
                parallel: false
            })
        );
        assert_eq!(
            events.last(),
            Some(&ExecutionEvent::Completed {
                succeeded: 1,
                failed: 1,
                stopped: None
            })
        );
        assert!(events.contains(&ExecutionEvent::ModuleFinished {
            index: 1,
            name: "b".into(),
            state: TaskState::Failed
        }));
    }
}
