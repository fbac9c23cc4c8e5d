//! Exclude pattern matching for module discovery.
//!
//! Patterns follow a gitignore-like dialect:
//! - `node_modules` matches any path component with that exact name
//! - `build/` matches the `build` directory and everything beneath it
//! - `*.tmp` matches any single component against the glob
//! - `test/*/fixtures` matches the whole relative path against the glob

use std::path::Path;

use globset::{GlobBuilder, GlobMatcher};

use crate::domain::errors::DiscoveryError;

/// Name of the optional ignore file read from the workspace root.
pub const IGNORE_FILE_NAME: &str = ".bumpkinignore";

#[derive(Debug, Clone)]
enum Rule {
    /// Directory prefix from a trailing-slash pattern.
    Dir(String),
    /// Literal component name.
    Component(String),
    /// Literal relative path.
    Path(String),
    /// Glob applied to each component.
    ComponentGlob(GlobMatcher),
    /// Glob applied to the whole relative path, and to the final component.
    PathGlob(GlobMatcher),
}

/// Compiled set of exclude patterns.
#[derive(Debug, Clone, Default)]
pub struct ExcludeMatcher {
    rules: Vec<Rule>,
}

impl ExcludeMatcher {
    pub fn new<I, S>(patterns: I) -> Result<Self, DiscoveryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut matcher = Self::default();
        for pattern in patterns {
            let pattern = pattern.as_ref().trim().replace('\\', "/");
            if pattern.is_empty() || pattern.starts_with('#') {
                continue;
            }
            matcher.rules.push(compile(&pattern)?);
        }
        Ok(matcher)
    }

    /// Whether a root-relative path is excluded.
    pub fn matches(&self, rel_path: &str) -> bool {
        let path = rel_path.replace('\\', "/");
        let path = path.trim_matches('/');
        if path.is_empty() || path == "." {
            return false;
        }
        self.rules.iter().any(|rule| rule_matches(rule, path))
    }
}

fn has_wildcard(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

fn glob(pattern: &str) -> Result<GlobMatcher, DiscoveryError> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map(|g| g.compile_matcher())
        .map_err(|e| DiscoveryError::InvalidExcludePattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })
}

fn compile(pattern: &str) -> Result<Rule, DiscoveryError> {
    if let Some(dir) = pattern.strip_suffix('/') {
        return Ok(Rule::Dir(dir.trim_start_matches('/').to_string()));
    }
    let trimmed = pattern.trim_start_matches('/');
    match (has_wildcard(trimmed), trimmed.contains('/')) {
        (false, false) => Ok(Rule::Component(trimmed.to_string())),
        (false, true) => Ok(Rule::Path(trimmed.to_string())),
        (true, false) => glob(trimmed).map(Rule::ComponentGlob),
        (true, true) => glob(trimmed).map(Rule::PathGlob),
    }
}

fn rule_matches(rule: &Rule, path: &str) -> bool {
    match rule {
        Rule::Dir(dir) => path == dir || path.starts_with(&format!("{dir}/")),
        Rule::Component(name) => path.split('/').any(|c| c == name),
        Rule::Path(literal) => path == literal || path.starts_with(&format!("{literal}/")),
        Rule::ComponentGlob(glob) => path.split('/').any(|c| glob.is_match(c)),
        Rule::PathGlob(glob) => {
            glob.is_match(path) || path.rsplit('/').next().is_some_and(|c| glob.is_match(c))
        }
    }
}

/// Parse ignore file contents: one pattern per line, blanks and `#` comments skipped.
pub fn parse_ignore_file(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(ToString::to_string)
        .collect()
}

/// Load patterns from the root's ignore file; a missing file yields none.
pub fn load_ignore_file(root: &Path) -> Result<Vec<String>, DiscoveryError> {
    let path = root.join(IGNORE_FILE_NAME);
    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(parse_ignore_file(&contents)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(source) => Err(DiscoveryError::IgnoreFile { path, source }),
    }
}
