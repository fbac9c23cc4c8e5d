//! Discovery engine: locates modules under a workspace root.

use std::path::{Path, PathBuf};

use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use crate::domain::errors::DiscoveryError;
use crate::domain::models::{Config, DetectedContext, Module};
use crate::infrastructure::version_file::peek_version;
use crate::services::exclude::{load_ignore_file, ExcludeMatcher};

/// Discovers version files and classifies the workspace.
///
/// Read-only: nothing on disk is touched.
#[derive(Debug, Clone)]
pub struct Detector {
    config: Config,
    cancel: Option<CancellationToken>,
}

impl Detector {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            cancel: None,
        }
    }

    /// Stop walking when the token is cancelled.
    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Classify the workspace rooted at `root`.
    pub fn detect_context(&self, root: &Path) -> Result<DetectedContext, DiscoveryError> {
        let modules = self.discover(root)?;
        let context = DetectedContext::from_modules(modules);
        debug!(mode = %context.mode(), root = %root.display(), "workspace detected");
        Ok(context)
    }

    /// All modules under `root`, in deterministic order.
    ///
    /// An explicit manifest wins over every discovery rule. With discovery disabled only
    /// the configured version file path is inspected.
    #[instrument(skip(self, root), fields(root = %root.display()))]
    pub fn discover(&self, root: &Path) -> Result<Vec<Module>, DiscoveryError> {
        let root = readable_root(root)?;
        let version_file = self.config.version_file_name();

        if let Some(workspace) = self
            .config
            .workspace
            .as_ref()
            .filter(|ws| !ws.modules.is_empty())
        {
            workspace.validate(&root, &version_file)?;
            let modules = workspace
                .modules
                .iter()
                .filter(|m| m.is_enabled())
                .map(|m| {
                    let path = m.resolve_path(&root, &version_file);
                    let rel = relative(&root, &path);
                    let version = peek_version(&path);
                    Module::new(m.name.clone(), path, rel, version)
                })
                .collect::<Vec<_>>();
            debug!(count = modules.len(), "using explicit module manifest");
            return Ok(modules);
        }

        let discovery = self.config.discovery();
        discovery.validate()?;

        if !discovery.enabled {
            return Ok(self.legacy_module(&root).into_iter().collect());
        }

        let mut patterns = self.config.exclude_patterns();
        patterns.extend(load_ignore_file(&root)?);
        let matcher = ExcludeMatcher::new(&patterns)?;

        self.walk(&root, &version_file, discovery.effective_depth(), &matcher)
    }

    fn legacy_module(&self, root: &Path) -> Option<Module> {
        let path = root.join(&self.config.path);
        if !path.is_file() {
            debug!(path = %path.display(), "discovery disabled and no version file present");
            return None;
        }
        let name = path
            .parent()
            .and_then(Path::file_name)
            .map_or_else(|| ".".to_string(), |n| n.to_string_lossy().into_owned());
        let rel = relative(root, &path);
        let version = peek_version(&path);
        Some(Module::new(name, path, rel, version))
    }

    fn walk(
        &self,
        root: &Path,
        version_file: &str,
        max_depth: usize,
        matcher: &ExcludeMatcher,
    ) -> Result<Vec<Module>, DiscoveryError> {
        let mut modules = Vec::new();

        let walker = WalkDir::new(root)
            .max_depth(max_depth)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !entry.file_type().is_dir()
                    || !matcher.matches(&relative(root, entry.path()))
            });

        for entry in walker {
            if self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled) {
                return Err(DiscoveryError::Cancelled);
            }

            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(%err, "skipping unreadable path during discovery");
                    continue;
                }
            };
            if !entry.file_type().is_dir() {
                continue;
            }

            let dir = entry.path();
            let candidate = dir.join(version_file);
            if !candidate.is_file() {
                continue;
            }
            if std::fs::read_dir(dir).is_err() {
                warn!(dir = %dir.display(), "skipping unreadable directory during discovery");
                continue;
            }

            let name = dir
                .file_name()
                .map_or_else(|| ".".to_string(), |n| n.to_string_lossy().into_owned());
            let rel = relative(root, &candidate);
            debug!(module = %name, path = %rel, "found module");
            let version = peek_version(&candidate);
            modules.push(Module::new(name, candidate, rel, version));
        }

        Ok(modules)
    }
}

/// Canonical root, failing when it cannot be listed.
fn readable_root(root: &Path) -> Result<PathBuf, DiscoveryError> {
    let unreadable = |source| DiscoveryError::UnreadableRoot {
        path: root.to_path_buf(),
        source,
    };
    let canonical = root.canonicalize().map_err(unreadable)?;
    std::fs::read_dir(&canonical).map_err(unreadable)?;
    Ok(canonical)
}

/// `/`-separated path of `path` relative to `root`, or the path itself when outside it.
fn relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
