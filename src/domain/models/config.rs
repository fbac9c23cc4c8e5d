use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::errors::DiscoveryError;

/// Default version file name.
pub const DEFAULT_VERSION_FILE: &str = ".version";

/// Patterns excluded from discovery unless the walk is told otherwise.
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &[
    "node_modules",
    ".git",
    "vendor",
    "tmp",
    "build",
    "dist",
    ".cache",
    "__pycache__",
];

/// Main configuration structure for bumpkin
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Version file name, or the legacy single-file path
    #[serde(default = "default_path")]
    pub path: String,

    /// Multi-module workspace configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace: Option<WorkspaceConfig>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_path() -> String {
    DEFAULT_VERSION_FILE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: default_path(),
            workspace: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Discovery settings with defaults applied.
    pub fn discovery(&self) -> DiscoveryConfig {
        self.workspace
            .as_ref()
            .and_then(|ws| ws.discovery.clone())
            .unwrap_or_default()
    }

    /// Default excludes followed by configured ones, without duplicates.
    pub fn exclude_patterns(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        DEFAULT_EXCLUDE_PATTERNS
            .iter()
            .map(ToString::to_string)
            .chain(self.discovery().exclude)
            .filter(|p| seen.insert(p.clone()))
            .collect()
    }

    pub fn has_explicit_modules(&self) -> bool {
        self.workspace
            .as_ref()
            .is_some_and(|ws| !ws.modules.is_empty())
    }

    /// File name searched for during discovery.
    pub fn version_file_name(&self) -> String {
        Path::new(&self.path)
            .file_name()
            .map_or_else(default_path, |n| n.to_string_lossy().into_owned())
    }

    /// Configured path when it differs from the default, acting like an explicit `--path`.
    pub fn explicit_path(&self) -> Option<PathBuf> {
        (!self.path.is_empty() && self.path != DEFAULT_VERSION_FILE)
            .then(|| PathBuf::from(&self.path))
    }
}

/// Multi-module workspace configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct WorkspaceConfig {
    /// Automatic discovery settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discovery: Option<DiscoveryConfig>,

    /// Explicit module manifest, overrides discovery when non-empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modules: Vec<ModuleConfig>,
}

impl WorkspaceConfig {
    /// Check manifest invariants against the workspace root.
    pub fn validate(&self, root: &Path, version_file: &str) -> Result<(), DiscoveryError> {
        if let Some(discovery) = &self.discovery {
            discovery.validate()?;
        }

        let mut names = HashSet::new();
        for module in &self.modules {
            if !names.insert(module.name.as_str()) {
                return Err(DiscoveryError::DuplicateModuleName(module.name.clone()));
            }
        }

        for module in self.modules.iter().filter(|m| m.is_enabled()) {
            let path = module.resolve_path(root, version_file);
            if !path.is_file() {
                return Err(DiscoveryError::ModulePathNotFound {
                    name: module.name.clone(),
                    path,
                });
            }
        }

        Ok(())
    }
}

/// Automatic discovery settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DiscoveryConfig {
    /// Whether discovery walks the tree at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Whether discovery descends below the root's immediate children
    #[serde(default = "default_true")]
    pub recursive: bool,

    /// Deepest directory inspected, the root being depth 0
    #[serde(default = "default_max_depth")]
    pub max_depth: i32,

    /// Extra exclude patterns, appended to the defaults
    #[serde(default)]
    pub exclude: Vec<String>,
}

const fn default_true() -> bool {
    true
}

const fn default_max_depth() -> i32 {
    10
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            recursive: default_true(),
            max_depth: default_max_depth(),
            exclude: Vec::new(),
        }
    }
}

impl DiscoveryConfig {
    pub const fn validate(&self) -> Result<(), DiscoveryError> {
        if self.max_depth < 0 {
            return Err(DiscoveryError::InvalidMaxDepth(self.max_depth));
        }
        Ok(())
    }

    /// Depth limit actually walked: one level when not recursive.
    pub fn effective_depth(&self) -> usize {
        let depth = usize::try_from(self.max_depth).unwrap_or(0);
        if self.recursive {
            depth
        } else {
            depth.min(1)
        }
    }
}

/// Explicitly declared module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ModuleConfig {
    /// Module identifier, unique across the manifest
    pub name: String,

    /// Version file path, or a directory holding one, relative to the root
    pub path: String,

    /// Disabled modules are skipped
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl ModuleConfig {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            enabled: true,
        }
    }

    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Absolute version file path; a directory resolves to the version file inside it.
    pub fn resolve_path(&self, root: &Path, version_file: &str) -> PathBuf {
        let declared = Path::new(&self.path);
        let path = if declared.is_absolute() {
            declared.to_path_buf()
        } else {
            root.join(declared)
        };
        if path.is_dir() {
            path.join(version_file)
        } else {
            path
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default)]
    pub format: LogFormat,

    /// Directory for rolling log files, stderr only when unset
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            log_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.path, ".version");
        assert!(!config.has_explicit_modules());
        assert_eq!(config.explicit_path(), None);
        assert_eq!(config.discovery(), DiscoveryConfig::default());
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
path: .version
workspace:
  discovery:
    recursive: false
    max_depth: 3
    exclude:
      - fixtures
      - node_modules
  modules:
    - name: api
      path: services/api/.version
    - name: legacy
      path: legacy
      enabled: false
logging:
  level: debug
  format: json
";
        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");
        let discovery = config.discovery();
        assert!(discovery.enabled);
        assert!(!discovery.recursive);
        assert_eq!(discovery.max_depth, 3);
        assert!(config.has_explicit_modules());
        assert!(!config.workspace.as_ref().unwrap().modules[1].is_enabled());
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_exclude_patterns_append_without_duplicates() {
        let config = Config {
            workspace: Some(WorkspaceConfig {
                discovery: Some(DiscoveryConfig {
                    exclude: vec!["fixtures".into(), "node_modules".into()],
                    ..DiscoveryConfig::default()
                }),
                modules: vec![],
            }),
            ..Config::default()
        };
        let patterns = config.exclude_patterns();
        assert_eq!(patterns.len(), DEFAULT_EXCLUDE_PATTERNS.len() + 1);
        assert_eq!(patterns.last().map(String::as_str), Some("fixtures"));
    }

    #[test]
    fn test_effective_depth() {
        let mut discovery = DiscoveryConfig::default();
        assert_eq!(discovery.effective_depth(), 10);
        discovery.recursive = false;
        assert_eq!(discovery.effective_depth(), 1);
        discovery.max_depth = 0;
        assert_eq!(discovery.effective_depth(), 0);
    }

    #[test]
    fn test_negative_max_depth_rejected() {
        let discovery = DiscoveryConfig {
            max_depth: -1,
            ..DiscoveryConfig::default()
        };
        assert!(matches!(
            discovery.validate(),
            Err(DiscoveryError::InvalidMaxDepth(-1))
        ));
    }

    #[test]
    fn test_validate_duplicate_names() {
        let tmp = TempDir::new().unwrap();
        let ws = WorkspaceConfig {
            discovery: None,
            modules: vec![ModuleConfig::new("api", "a"), ModuleConfig::new("api", "b")],
        };
        let err = ws.validate(tmp.path(), ".version").unwrap_err();
        assert!(matches!(err, DiscoveryError::DuplicateModuleName(name) if name == "api"));
    }

    #[test]
    fn test_validate_missing_path_and_directory_resolution() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("api")).unwrap();
        std::fs::write(tmp.path().join("api/.version"), "1.0.0\n").unwrap();

        let ok = WorkspaceConfig {
            discovery: None,
            modules: vec![ModuleConfig::new("api", "api")],
        };
        ok.validate(tmp.path(), ".version").expect("directory path resolves");

        let missing = WorkspaceConfig {
            discovery: None,
            modules: vec![ModuleConfig::new("web", "web/.version")],
        };
        assert!(matches!(
            missing.validate(tmp.path(), ".version"),
            Err(DiscoveryError::ModulePathNotFound { name, .. }) if name == "web"
        ));
    }

    #[test]
    fn test_disabled_modules_skip_path_check() {
        let tmp = TempDir::new().unwrap();
        let mut module = ModuleConfig::new("gone", "gone/.version");
        module.enabled = false;
        let ws = WorkspaceConfig {
            discovery: None,
            modules: vec![module],
        };
        assert!(ws.validate(tmp.path(), ".version").is_ok());
    }

    #[test]
    fn test_explicit_path() {
        let config = Config {
            path: "VERSION.txt".to_string(),
            ..Config::default()
        };
        assert_eq!(config.explicit_path(), Some(PathBuf::from("VERSION.txt")));
        assert_eq!(config.version_file_name(), "VERSION.txt");
    }
}
