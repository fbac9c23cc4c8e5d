//! Workspace shape classification produced by discovery.

use std::fmt;
use std::path::PathBuf;

use super::module::Module;

/// How many modules discovery found, and therefore how a command should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkspaceMode {
    /// Exactly one version file anywhere under the root; the engine is bypassed.
    SingleModule,
    /// Two or more version files; the concurrent engine is engaged.
    MultiModule,
    /// No version files at all.
    NoModules,
}

impl WorkspaceMode {
    /// Classify a discovery result by module count.
    pub const fn classify(count: usize) -> Self {
        match count {
            0 => Self::NoModules,
            1 => Self::SingleModule,
            _ => Self::MultiModule,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SingleModule => "SingleModule",
            Self::MultiModule => "MultiModule",
            Self::NoModules => "NoModules",
        }
    }
}

impl fmt::Display for WorkspaceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of detecting the workspace shape for one invocation.
///
/// Built once per invocation and never cached: the filesystem may change between commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectedContext {
    /// The single version file to operate on directly.
    Single { path: PathBuf, module: Module },
    /// All modules, in discovery order.
    Multi { modules: Vec<Module> },
    /// Nothing was found.
    Empty,
}

impl DetectedContext {
    /// Build the context from an ordered discovery result.
    pub fn from_modules(mut modules: Vec<Module>) -> Self {
        match WorkspaceMode::classify(modules.len()) {
            WorkspaceMode::NoModules => Self::Empty,
            WorkspaceMode::SingleModule => {
                let module = modules.remove(0);
                Self::Single {
                    path: module.path.clone(),
                    module,
                }
            }
            WorkspaceMode::MultiModule => Self::Multi { modules },
        }
    }

    pub const fn mode(&self) -> WorkspaceMode {
        match self {
            Self::Single { .. } => WorkspaceMode::SingleModule,
            Self::Multi { .. } => WorkspaceMode::MultiModule,
            Self::Empty => WorkspaceMode::NoModules,
        }
    }

    /// Modules this context knows about, in discovery order.
    pub fn modules(&self) -> Vec<&Module> {
        match self {
            Self::Single { module, .. } => vec![module],
            Self::Multi { modules } => modules.iter().collect(),
            Self::Empty => Vec::new(),
        }
    }
}
