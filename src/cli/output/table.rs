//! Table builder wrapper around comfy-table.

use comfy_table::{presets, Cell, CellAlignment, ContentArrangement, Table};

use super::{describe_result, ResultFormatter};
use crate::domain::models::{ExecutionResult, Module};
use crate::services::aggregate::quiet_summary;

/// Create a standard list table with the given headers.
///
/// Uses the NOTHING preset (no borders) for a clean CLI aesthetic.
pub fn list_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(h.to_uppercase()).set_alignment(CellAlignment::Left)),
        );
    table
}

/// Aligned columns, one row per module, followed by the summary line.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableFormatter;

impl ResultFormatter for TableFormatter {
    fn format(&self, results: &[ExecutionResult], title: &str, verb: &str) -> String {
        let mut table = list_table(&["module", "path", "status", "result", "duration"]);
        for result in results {
            table.add_row(vec![
                result.module.name.clone(),
                result.module.rel_path.clone(),
                if result.success { "ok" } else { "failed" }.to_string(),
                describe_result(result),
                format!("{}ms", result.duration.as_millis()),
            ]);
        }
        format!("{title}\n{table}\n\n{}", quiet_summary(results, verb))
    }
}

pub(super) fn render_module_table(modules: &[Module]) -> String {
    if modules.is_empty() {
        return "No modules found.".to_string();
    }
    let mut table = list_table(&["name", "path", "version"]);
    for module in modules {
        table.add_row(vec![
            module.name.as_str(),
            module.rel_path.as_str(),
            module.current_version.as_str(),
        ]);
    }
    table.to_string()
}
