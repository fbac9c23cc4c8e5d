//! Concrete per-module operations run by the executor.

mod bump;
mod set;
mod show;
mod validate;

pub use bump::{BumpOperation, BumpOptions};
pub use set::SetOperation;
pub use show::ShowOperation;
pub use validate::ValidateOperation;

use tokio_util::sync::CancellationToken;

use crate::domain::errors::OperationError;

fn ensure_active(cancel: &CancellationToken) -> Result<(), OperationError> {
    if cancel.is_cancelled() {
        Err(OperationError::Cancelled)
    } else {
        Ok(())
    }
}
