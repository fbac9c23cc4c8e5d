//! Operation port - the per-module unit of work the executor applies.

use async_trait::async_trait;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::domain::errors::OperationError;
use crate::domain::models::Module;

/// A capability applied to one module at a time.
///
/// Implementations receive their own `Module` value and must not share mutable
/// state with other invocations. The token is cancelled when the run is stopped;
/// honouring it is cooperative.
#[async_trait]
pub trait Operation: Send + Sync {
    /// Short name used in headings and logs, e.g. `bump patch`.
    fn name(&self) -> String;

    /// Past-tense verb for summaries, e.g. `updated`.
    fn verb(&self) -> &'static str {
        "processed"
    }

    /// Apply the operation, returning operation-defined data.
    async fn execute(
        &self,
        cancel: &CancellationToken,
        module: &Module,
    ) -> Result<Option<Value>, OperationError>;
}
