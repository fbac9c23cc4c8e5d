//! Infrastructure layer: configuration, logging and version file I/O.

pub mod config;
pub mod logging;
pub mod version_file;
