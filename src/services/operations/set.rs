use async_trait::async_trait;
use semver::Version;
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::ensure_active;
use crate::domain::errors::OperationError;
use crate::domain::models::version::parse_version;
use crate::domain::models::Module;
use crate::domain::ports::Operation;
use crate::infrastructure::version_file::{read_version, write_version};

/// Writes the same explicit version to every module.
#[derive(Debug, Clone)]
pub struct SetOperation {
    version: Version,
}

impl SetOperation {
    /// Parse `input` up front so a bad version fails before any module runs.
    pub fn new(input: &str) -> Result<Self, OperationError> {
        let version = parse_version(input).map_err(|reason| OperationError::InvalidVersion {
            input: input.to_string(),
            reason,
        })?;
        Ok(Self { version })
    }
}

#[async_trait]
impl Operation for SetOperation {
    fn name(&self) -> String {
        format!("set version to {}", self.version)
    }

    fn verb(&self) -> &'static str {
        "updated"
    }

    async fn execute(
        &self,
        cancel: &CancellationToken,
        module: &Module,
    ) -> Result<Option<Value>, OperationError> {
        ensure_active(cancel)?;
        let old = read_version(&module.path).await.ok();
        write_version(&module.path, &self.version).await?;
        debug!(module = %module.name, version = %self.version, "version set");

        let mut data = json!({ "new_version": self.version.to_string() });
        if let Some(old) = old {
            data["old_version"] = Value::String(old.to_string());
        }
        Ok(Some(data))
    }
}
