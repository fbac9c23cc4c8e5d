//! Domain layer for the bumpkin workspace engine
//!
//! Models, the error taxonomy, and the ports the engine consumes.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DiscoveryError, OperationError, RunError, SelectionError};
