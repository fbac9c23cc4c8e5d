//! Module, the unit of independent versioning inside a workspace.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// A single versioned module within a workspace.
///
/// Modules are value objects: discovery builds them fresh on every pass and
/// nothing mutates them afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Module {
    /// Module identifier, the directory base name unless declared explicitly.
    pub name: String,

    /// Version file path relative to the workspace root, `/`-separated.
    #[serde(rename = "path")]
    pub rel_path: String,

    /// Version string read at discovery time, empty when missing or unparseable.
    #[serde(rename = "version")]
    pub current_version: String,

    /// Absolute path to the version file.
    #[serde(skip)]
    pub path: PathBuf,

    /// Directory containing the version file.
    #[serde(skip)]
    pub dir: PathBuf,
}

impl Module {
    pub fn new(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        rel_path: impl Into<String>,
        current_version: impl Into<String>,
    ) -> Self {
        let path = path.into();
        let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Self {
            name: name.into(),
            rel_path: rel_path.into(),
            current_version: current_version.into(),
            path,
            dir,
        }
    }

    /// Module for a bare version file path, used in single-module mode.
    pub fn from_version_path(path: &Path) -> Self {
        let name = path
            .parent()
            .and_then(|dir| {
                if dir.as_os_str().is_empty() {
                    std::env::current_dir().ok()
                } else {
                    dir.canonicalize().ok().or_else(|| Some(dir.to_path_buf()))
                }
            })
            .and_then(|dir| dir.file_name().map(|n| n.to_string_lossy().into_owned()))
            .unwrap_or_else(|| ".".to_string());
        Self::new(name, path, path.to_string_lossy().replace('\\', "/"), "")
    }

    /// Directory of the version file relative to the root, `.` for the root itself.
    pub fn rel_dir(&self) -> &str {
        match self.rel_path.rfind('/') {
            Some(idx) => &self.rel_path[..idx],
            None => ".",
        }
    }

    /// "name (version)", or just the name when the version is unknown.
    pub fn display_name(&self) -> String {
        if self.current_version.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.current_version)
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}
