use async_trait::async_trait;
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;

use super::ensure_active;
use crate::domain::errors::OperationError;
use crate::domain::models::Module;
use crate::domain::ports::Operation;
use crate::infrastructure::version_file::read_version;

/// Reads each module's current version.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShowOperation;

#[async_trait]
impl Operation for ShowOperation {
    fn name(&self) -> String {
        "show version".to_string()
    }

    fn verb(&self) -> &'static str {
        "shown"
    }

    async fn execute(
        &self,
        cancel: &CancellationToken,
        module: &Module,
    ) -> Result<Option<Value>, OperationError> {
        ensure_active(cancel)?;
        let version = read_version(&module.path).await?;
        Ok(Some(json!({ "version": version.to_string() })))
    }
}
