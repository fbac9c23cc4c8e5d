//! Output formatting for per-module results and module listings.
//!
//! Every formatter surfaces the same content (module, outcome, data or
//! error); only the presentation differs.

mod json;
mod table;
mod text;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

use crate::domain::models::{ExecutionResult, Module};

pub use json::JsonFormatter;
pub use table::{list_table, TableFormatter};
pub use text::TextFormatter;

/// Output modes accepted by `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Table,
}

impl OutputFormat {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
            Self::Table => "table",
        }
    }

    pub fn formatter(self) -> Box<dyn ResultFormatter> {
        match self {
            Self::Text => Box::new(TextFormatter),
            Self::Json => Box::new(JsonFormatter),
            Self::Table => Box::new(TableFormatter),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "table" => Ok(Self::Table),
            other => Err(format!(
                "unknown output format {other:?} (expected text, json or table)"
            )),
        }
    }
}

/// Renders execution results. Implementations are stateless and pure.
pub trait ResultFormatter: Send + Sync {
    /// `verb` completes the success summary, e.g. "bumped".
    fn format(&self, results: &[ExecutionResult], title: &str, verb: &str) -> String;
}

/// Look up a formatter by key; unknown keys are an error.
pub fn formatter_for(key: &str) -> Result<Box<dyn ResultFormatter>, String> {
    key.parse::<OutputFormat>().map(OutputFormat::formatter)
}

/// Trait for types that can be rendered as human-readable or JSON output.
pub trait CommandOutput: Serialize {
    fn to_human(&self) -> String;
    fn to_json(&self) -> Value;
}

/// Dispatch output based on JSON mode flag.
pub fn output<T: CommandOutput>(result: &T, json_mode: bool) {
    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(&result.to_json()).unwrap_or_default()
        );
    } else {
        println!("{}", result.to_human());
    }
}

/// Short human rendering of an operation's data payload.
pub fn describe_data(data: &Value) -> String {
    match (
        data.get("old_version").and_then(Value::as_str),
        data.get("new_version").and_then(Value::as_str),
        data.get("version").and_then(Value::as_str),
    ) {
        (Some(old), Some(new), _) => format!("{old} -> {new}"),
        (None, Some(new), _) => new.to_string(),
        (_, _, Some(version)) => version.to_string(),
        _ => data.to_string(),
    }
}

/// Result detail for one module: its data on success, its error otherwise.
pub fn describe_result(result: &ExecutionResult) -> String {
    if result.success {
        result.data.as_ref().map(describe_data).unwrap_or_default()
    } else {
        result.error.clone().unwrap_or_else(|| "unknown error".to_string())
    }
}

#[derive(Serialize)]
struct ModuleEntry<'a> {
    name: &'a str,
    path: &'a str,
    version: &'a str,
}

/// Render a module listing in the requested format.
pub fn render_modules(modules: &[Module], format: OutputFormat, verbose: bool) -> String {
    match format {
        OutputFormat::Json => {
            let entries: Vec<ModuleEntry<'_>> = modules
                .iter()
                .map(|m| ModuleEntry {
                    name: &m.name,
                    path: &m.rel_path,
                    version: &m.current_version,
                })
                .collect();
            serde_json::to_string_pretty(&entries).unwrap_or_default()
        }
        OutputFormat::Table => table::render_module_table(modules),
        OutputFormat::Text => text::render_module_list(modules, verbose),
    }
}
