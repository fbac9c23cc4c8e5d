use serde::Serialize;
use serde_json::Value;

use super::ResultFormatter;
use crate::domain::models::ExecutionResult;

/// Pretty JSON array, one object per module.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonResult<'a> {
    name: &'a str,
    path: &'a str,
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
    duration_ms: u64,
}

impl ResultFormatter for JsonFormatter {
    fn format(&self, results: &[ExecutionResult], _title: &str, _verb: &str) -> String {
        let entries: Vec<JsonResult<'_>> = results
            .iter()
            .map(|r| JsonResult {
                name: &r.module.name,
                path: &r.module.rel_path,
                success: r.success,
                result: r.data.as_ref(),
                error: r.error.as_deref(),
                duration_ms: u64::try_from(r.duration.as_millis()).unwrap_or(u64::MAX),
            })
            .collect();
        serde_json::to_string_pretty(&entries).unwrap_or_default()
    }
}
