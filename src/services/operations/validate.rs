use async_trait::async_trait;
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;

use super::ensure_active;
use crate::domain::errors::OperationError;
use crate::domain::models::Module;
use crate::domain::ports::Operation;
use crate::infrastructure::version_file::read_version;

/// Checks that each module's version file holds a valid version.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateOperation;

#[async_trait]
impl Operation for ValidateOperation {
    fn name(&self) -> String {
        "validate version file".to_string()
    }

    fn verb(&self) -> &'static str {
        "validated"
    }

    async fn execute(
        &self,
        cancel: &CancellationToken,
        module: &Module,
    ) -> Result<Option<Value>, OperationError> {
        ensure_active(cancel)?;
        match read_version(&module.path).await {
            Ok(version) => Ok(Some(json!({ "version": version.to_string() }))),
            Err(OperationError::InvalidVersionFile { reason, .. }) => Err(OperationError::Failed(
                format!("invalid version file: {reason}"),
            )),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_validate_reports_invalid_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(".version");
        std::fs::write(&path, "one point oh").unwrap();
        let module = Module::new("pkg", &path, ".version", "");

        let err = ValidateOperation
            .execute(&CancellationToken::new(), &module)
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("invalid version file"));
    }

    #[tokio::test]
    async fn test_validate_accepts_valid_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(".version");
        std::fs::write(&path, "0.1.0-alpha\n").unwrap();
        let module = Module::new("pkg", &path, ".version", "");

        let data = ValidateOperation
            .execute(&CancellationToken::new(), &module)
            .await
            .unwrap();
        assert_eq!(data, Some(json!({ "version": "0.1.0-alpha" })));
    }
}
