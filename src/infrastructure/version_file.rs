//! Version file I/O.

use std::path::Path;

use semver::Version;

use crate::domain::errors::OperationError;
use crate::domain::models::version::parse_version;

/// Read and parse the version stored at `path`.
pub async fn read_version(path: &Path) -> Result<Version, OperationError> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| OperationError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    parse_version(&contents).map_err(|reason| OperationError::InvalidVersionFile {
        path: path.to_path_buf(),
        reason,
    })
}

/// Write `version` to `path` as a single line, creating parent directories.
pub async fn write_version(path: &Path, version: &Version) -> Result<(), OperationError> {
    let write_err = |source| OperationError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
    }
    tokio::fs::write(path, format!("{version}\n"))
        .await
        .map_err(write_err)
}

/// Best-effort synchronous read used during discovery; empty when unreadable.
pub fn peek_version(path: &Path) -> String {
    std::fs::read_to_string(path)
        .ok()
        .and_then(|contents| parse_version(&contents).ok())
        .map(|v| v.to_string())
        .unwrap_or_default()
}
