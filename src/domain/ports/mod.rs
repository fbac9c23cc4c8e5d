//! Port trait definitions
//!
//! - Operation: the per-module unit of work run by the executor
//! - ModuleSelector: interactive choice of target modules

pub mod module_selector;
pub mod operation;

pub use module_selector::ModuleSelector;
pub use operation::Operation;
