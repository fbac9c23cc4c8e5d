use async_trait::async_trait;
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::ensure_active;
use crate::domain::errors::OperationError;
use crate::domain::models::version::{bump, with_build, with_prerelease};
use crate::domain::models::{BumpKind, Module};
use crate::domain::ports::Operation;
use crate::infrastructure::version_file::{read_version, write_version};

/// Extra knobs applied after the bump itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BumpOptions {
    /// Pre-release label, e.g. `rc.1`.
    pub pre: Option<String>,
    /// Build metadata, e.g. `sha.abc123`.
    pub meta: Option<String>,
    /// Keep existing build metadata when `meta` is unset.
    pub preserve_meta: bool,
}

/// Bumps each module's version by the same kind.
#[derive(Debug, Clone)]
pub struct BumpOperation {
    kind: BumpKind,
    options: BumpOptions,
}

impl BumpOperation {
    pub const fn new(kind: BumpKind, options: BumpOptions) -> Self {
        Self { kind, options }
    }

    fn next_version(&self, current: &semver::Version) -> Result<semver::Version, OperationError> {
        let invalid = |reason: String| OperationError::InvalidVersion {
            input: current.to_string(),
            reason,
        };
        let mut next = bump(current, self.kind).map_err(invalid)?;
        if let Some(pre) = &self.options.pre {
            next = with_prerelease(next, pre).map_err(invalid)?;
        }
        match &self.options.meta {
            Some(meta) => next = with_build(next, meta).map_err(invalid)?,
            None if self.options.preserve_meta && !current.build.is_empty() => {
                next.build = current.build.clone();
            }
            None => {}
        }
        Ok(next)
    }
}

#[async_trait]
impl Operation for BumpOperation {
    fn name(&self) -> String {
        format!("bump {}", self.kind)
    }

    fn verb(&self) -> &'static str {
        "bumped"
    }

    async fn execute(
        &self,
        cancel: &CancellationToken,
        module: &Module,
    ) -> Result<Option<Value>, OperationError> {
        ensure_active(cancel)?;
        let current = read_version(&module.path).await?;
        let next = self.next_version(&current)?;
        ensure_active(cancel)?;
        write_version(&module.path, &next).await?;
        debug!(module = %module.name, from = %current, to = %next, "version bumped");

        Ok(Some(json!({
            "old_version": current.to_string(),
            "new_version": next.to_string(),
        })))
    }
}
