use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Project config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".bumpkin.yaml";

/// Prefix for environment overrides; `__` separates nested keys.
pub const ENV_PREFIX: &str = "BUMPKIN_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid max_depth: {0}. Must be zero or greater")]
    InvalidMaxDepth(i32),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Version file path cannot be empty")]
    EmptyPath,

    #[error("Workspace module at index {0} has an empty name")]
    EmptyModuleName(usize),

    #[error("Workspace module '{0}' has an empty path")]
    EmptyModulePath(String),

    #[error("Duplicate module name in workspace configuration: {0}")]
    DuplicateModuleName(String),

    #[error("Config file not found: {0}")]
    MissingFile(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. `config_file`, or `.bumpkin.yaml` in the working directory when absent
    /// 3. Environment variables (`BUMPKIN_*` prefix, highest priority)
    ///
    /// An explicit `config_file` must exist; the default file is optional.
    pub fn load(config_file: Option<&Path>) -> Result<Config> {
        if let Some(path) = config_file {
            if !path.is_file() {
                return Err(ConfigError::MissingFile(path.display().to_string()).into());
            }
        }
        let file = config_file.unwrap_or_else(|| Path::new(CONFIG_FILE_NAME));

        let config: Config = Self::figment(file)
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    fn figment(file: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.path.trim().is_empty() {
            return Err(ConfigError::EmptyPath);
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let Some(workspace) = &config.workspace else {
            return Ok(());
        };

        if let Some(discovery) = &workspace.discovery {
            if discovery.max_depth < 0 {
                return Err(ConfigError::InvalidMaxDepth(discovery.max_depth));
            }
        }

        let mut seen = HashSet::new();
        for (index, module) in workspace.modules.iter().enumerate() {
            if module.name.trim().is_empty() {
                return Err(ConfigError::EmptyModuleName(index));
            }
            if module.path.trim().is_empty() {
                return Err(ConfigError::EmptyModulePath(module.name.clone()));
            }
            if !seen.insert(module.name.as_str()) {
                return Err(ConfigError::DuplicateModuleName(module.name.clone()));
            }
        }

        Ok(())
    }
}
