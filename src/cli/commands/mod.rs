//! CLI command implementations.

pub mod bump;
pub mod common;
pub mod doctor;
pub mod modules;
pub mod set;
pub mod show;

pub use common::CommandContext;
