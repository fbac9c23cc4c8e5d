//! Interactive module selection on the terminal.

use std::io::IsTerminal;

use console::{style, Term};

use crate::domain::errors::SelectionError;
use crate::domain::models::Module;
use crate::domain::ports::ModuleSelector;

/// Prompts on stderr and reads the answer from the terminal.
pub struct TerminalSelector {
    term: Term,
}

impl TerminalSelector {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }
}

impl Default for TerminalSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleSelector for TerminalSelector {
    fn is_interactive(&self) -> bool {
        std::env::var_os("CI").is_none()
            && std::io::stdin().is_terminal()
            && std::io::stdout().is_terminal()
            && self.term.is_term()
    }

    fn select(&self, modules: &[Module]) -> Result<Vec<String>, SelectionError> {
        let io_err = |e: std::io::Error| SelectionError::PromptFailed(e.to_string());

        self.term
            .write_line(&format!("Found {} modules:", modules.len()))
            .map_err(io_err)?;
        for (index, module) in modules.iter().enumerate() {
            self.term
                .write_line(&format!(
                    "  {} {} {}",
                    style(format!("{:>2})", index + 1)).dim(),
                    module.display_name(),
                    style(module.rel_dir()).dim()
                ))
                .map_err(io_err)?;
        }
        self.term
            .write_str("Select modules (numbers or names, comma-separated; empty for all): ")
            .map_err(io_err)?;
        let answer = self.term.read_line().map_err(io_err)?;
        parse_selection(&answer, modules)
    }
}

/// Interpret a prompt answer as module names.
///
/// An empty answer or `all` selects everything; otherwise each comma-separated
/// entry is a 1-based index or a module name.
pub fn parse_selection(answer: &str, modules: &[Module]) -> Result<Vec<String>, SelectionError> {
    let answer = answer.trim();
    if answer.is_empty() || answer.eq_ignore_ascii_case("all") {
        return Ok(modules.iter().map(|m| m.name.clone()).collect());
    }

    let mut names = Vec::new();
    for entry in answer.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let name = match entry.parse::<usize>() {
            Ok(index) => modules
                .get(index.wrapping_sub(1))
                .map(|m| m.name.clone())
                .ok_or_else(|| SelectionError::ModuleNotFound(entry.to_string()))?,
            Err(_) => entry.to_string(),
        };
        if !names.contains(&name) {
            names.push(name);
        }
    }
    if names.is_empty() {
        return Err(SelectionError::NothingSelected);
    }
    Ok(names)
}
