//! Execution-context resolver: turns selectors plus discovery output into targets.

use std::collections::HashSet;
use std::path::PathBuf;

use globset::GlobBuilder;
use tracing::debug;

use crate::domain::errors::SelectionError;
use crate::domain::models::{DetectedContext, Module};
use crate::domain::ports::ModuleSelector;

/// Invocation-time selection inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selectors {
    /// Explicit version file; beats every other selector.
    pub path: Option<PathBuf>,
    /// Operate on every discovered module.
    pub all: bool,
    /// Named modules; entries may hold comma-separated lists.
    pub modules: Vec<String>,
    /// Glob matched against module names and directories.
    pub pattern: Option<String>,
    /// Skip prompting, select everything.
    pub yes: bool,
    /// Never prompt.
    pub non_interactive: bool,
}

impl Selectors {
    /// Requested names, split on commas, trimmed and de-duplicated in order.
    pub fn module_names(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.modules
            .iter()
            .flat_map(|entry| entry.split(','))
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .filter(|name| seen.insert((*name).to_string()))
            .map(ToString::to_string)
            .collect()
    }
}

/// What to do in a multi-module workspace when no selector was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DefaultSelection {
    /// Ask interactively when possible, otherwise take all.
    #[default]
    Prompt,
    /// Take all modules without asking, for read-only commands.
    All,
}

/// Final target of an invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Operate directly on one version file, bypassing the executor.
    Single(PathBuf),
    /// Run the executor over these modules, in discovery order.
    Targets(Vec<Module>),
}

/// Resolves which modules an invocation targets.
pub struct ContextResolver<'a> {
    prompt: Option<&'a dyn ModuleSelector>,
    default: DefaultSelection,
}

impl<'a> ContextResolver<'a> {
    pub const fn new(default: DefaultSelection) -> Self {
        Self {
            prompt: None,
            default,
        }
    }

    #[must_use]
    pub fn with_prompt(mut self, prompt: &'a dyn ModuleSelector) -> Self {
        self.prompt = Some(prompt);
        self
    }

    /// Apply selector precedence: path, then workspace shape, then
    /// named modules > pattern > all > prompt > default.
    pub fn resolve(
        &self,
        selectors: &Selectors,
        detected: &DetectedContext,
    ) -> Result<Resolution, SelectionError> {
        if let Some(path) = &selectors.path {
            debug!(path = %path.display(), "explicit path selected");
            return Ok(Resolution::Single(path.clone()));
        }

        let modules = match detected {
            DetectedContext::Single { path, .. } => return Ok(Resolution::Single(path.clone())),
            DetectedContext::Empty => return Err(SelectionError::NoModulesFound),
            DetectedContext::Multi { modules } => modules,
        };

        let names = selectors.module_names();
        if !names.is_empty() {
            return select_by_names(modules, &names).map(Resolution::Targets);
        }

        if let Some(pattern) = &selectors.pattern {
            return select_by_pattern(modules, pattern).map(Resolution::Targets);
        }

        if selectors.all || !self.should_prompt(selectors) {
            return Ok(Resolution::Targets(modules.clone()));
        }

        match self.prompt {
            Some(prompt) => {
                let chosen = prompt.select(modules)?;
                if chosen.is_empty() {
                    return Err(SelectionError::NothingSelected);
                }
                select_by_names(modules, &chosen).map(Resolution::Targets)
            }
            None => Ok(Resolution::Targets(modules.clone())),
        }
    }

    fn should_prompt(&self, selectors: &Selectors) -> bool {
        self.default == DefaultSelection::Prompt
            && !selectors.yes
            && !selectors.non_interactive
            && self.prompt.is_some_and(|prompt| prompt.is_interactive())
    }
}

/// Keep modules whose names were requested; every name must exist.
fn select_by_names(modules: &[Module], names: &[String]) -> Result<Vec<Module>, SelectionError> {
    let known: HashSet<&str> = modules.iter().map(|m| m.name.as_str()).collect();
    if let Some(missing) = names.iter().find(|name| !known.contains(name.as_str())) {
        return Err(SelectionError::ModuleNotFound(missing.clone()));
    }
    let wanted: HashSet<&str> = names.iter().map(String::as_str).collect();
    Ok(modules
        .iter()
        .filter(|m| wanted.contains(m.name.as_str()))
        .cloned()
        .collect())
}

/// Keep modules whose name or root-relative directory matches the glob.
fn select_by_pattern(modules: &[Module], pattern: &str) -> Result<Vec<Module>, SelectionError> {
    let matcher = GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|e| SelectionError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?
        .compile_matcher();

    let selected: Vec<Module> = modules
        .iter()
        .filter(|m| matcher.is_match(&m.name) || matcher.is_match(m.rel_dir()))
        .cloned()
        .collect();
    if selected.is_empty() {
        return Err(SelectionError::NoPatternMatch(pattern.to_string()));
    }
    Ok(selected)
}
