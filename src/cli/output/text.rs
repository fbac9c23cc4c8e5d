use console::style;

use super::{describe_result, ResultFormatter};
use crate::domain::models::{ExecutionResult, Module};
use crate::services::aggregate::quiet_summary;

/// Human list with a check or cross per module.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFormatter;

impl ResultFormatter for TextFormatter {
    fn format(&self, results: &[ExecutionResult], title: &str, verb: &str) -> String {
        let mut lines = vec![style(title).bold().to_string()];
        for result in results {
            let detail = describe_result(result);
            let line = if result.success {
                format!("  {} {}: {}", style("\u{2713}").green().bold(), result.module.name, detail)
            } else {
                format!("  {} {}: {}", style("\u{2717}").red().bold(), result.module.name, detail)
            };
            lines.push(line);
        }
        lines.push(String::new());
        lines.push(quiet_summary(results, verb));
        lines.join("\n")
    }
}

pub(super) fn render_module_list(modules: &[Module], verbose: bool) -> String {
    if modules.is_empty() {
        return "No modules found.".to_string();
    }
    let mut lines = vec![format!("Found {} module(s):", modules.len())];
    for module in modules {
        lines.push(format!("  {}", module.display_name()));
        if verbose {
            lines.push(format!("    path: {}", module.rel_path));
        }
    }
    lines.join("\n")
}
