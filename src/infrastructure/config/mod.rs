//! Configuration loading
//!
//! Hierarchical configuration using figment:
//! - Programmatic defaults
//! - `.bumpkin.yaml` (or an explicit `--config` file)
//! - `BUMPKIN_*` environment overrides

pub mod loader;

pub use loader::{ConfigError, ConfigLoader, CONFIG_FILE_NAME, ENV_PREFIX};
