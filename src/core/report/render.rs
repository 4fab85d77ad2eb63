use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde_json::Value;

use crate::types::AppResult;

const HTML_TEMPLATE: &str = include_str!("../../../assets/report-template.html");
const VIEWER_SCRIPT: &str = include_str!("../../../assets/mutation-test-elements.js");

const TITLE_TOKEN: &str = "##REPORT_TITLE##";
const SCRIPT_TOKEN: &str = "##REPORT_JS##";
const JSON_TOKEN: &str = "##REPORT_JSON##";

/// Render the aggregate report into a self-contained HTML document. Each
/// placeholder is substituted exactly once; the JSON payload goes in last so
/// report content cannot collide with the remaining tokens.
pub fn render(solution_name: &str, aggregate: &Value) -> AppResult<String> {
    let title = format!("{solution_name} Stryker report");
    Ok(HTML_TEMPLATE
        .replacen(TITLE_TOKEN, &title, 1)
        .replacen(SCRIPT_TOKEN, VIEWER_SCRIPT, 1)
        .replacen(JSON_TOKEN, &serde_json::to_string(aggregate)?, 1))
}

/// Write the rendered report beside the solution file with its extension
/// replaced by `html`. Returns the written path.
pub fn write_report(solution: &Path, aggregate: &Value) -> AppResult<PathBuf> {
    let solution_name = solution
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let html = render(&solution_name, aggregate)?;
    let report_path = solution.with_extension("html");
    fs::write(&report_path, html)?;
    debug!("rendered {}", report_path.display());

    Ok(report_path)
}
