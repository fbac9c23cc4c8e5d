//! Interactive module selection port.

use crate::domain::errors::SelectionError;
use crate::domain::models::Module;

/// Asks the user which of the discovered modules to operate on.
pub trait ModuleSelector: Send + Sync {
    /// Whether prompting is possible at all (attached terminal, not CI).
    fn is_interactive(&self) -> bool;

    /// Return the names of the chosen modules.
    fn select(&self, modules: &[Module]) -> Result<Vec<String>, SelectionError>;
}
