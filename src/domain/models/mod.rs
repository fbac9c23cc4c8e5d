pub mod config;
pub mod execution;
pub mod module;
pub mod version;
pub mod workspace;

pub use config::{
    Config, DiscoveryConfig, LogFormat, LoggingConfig, ModuleConfig, WorkspaceConfig,
    DEFAULT_EXCLUDE_PATTERNS, DEFAULT_VERSION_FILE,
};
pub use execution::{
    ExecutionEvent, ExecutionResult, ExecutorOptions, RunReport, TaskState,
};
pub use module::Module;
pub use version::BumpKind;
pub use workspace::{DetectedContext, WorkspaceMode};
