use serde::Serialize;

use crate::model::history::{OverallEntry, ParsedMeta, ReportRecord, Subject};
use crate::report::TIMESTAMP_FORMAT;

#[derive(Debug, Serialize)]
struct ReportSummary<'a> {
    tool: &'static str,
    tool_version: &'static str,
    subject: &'a Subject,
    generated_at: String,
    display_scale: u32,
    current_overall: Option<f64>,
    categories: Vec<CategorySummary<'a>>,
    overall_history: &'a [OverallEntry],
}

#[derive(Debug, Serialize)]
struct CategorySummary<'a> {
    category: &'a str,
    latest: Option<f64>,
    evaluations: usize,
    history: &'a [f64],
}

pub fn render_summary_json(
    record: &ReportRecord,
    display_scale: u32,
) -> Result<String, serde_json::Error> {
    let summary = ReportSummary {
        tool: env!("CARGO_PKG_NAME"),
        tool_version: env!("CARGO_PKG_VERSION"),
        subject: &record.subject,
        generated_at: record.generated_at.format(TIMESTAMP_FORMAT).to_string(),
        display_scale,
        current_overall: record.overall.latest().map(|e| e.rating),
        categories: record
            .categories
            .iter()
            .map(|h| CategorySummary {
                category: h.category(),
                latest: h.latest(),
                evaluations: h.len(),
                history: h.values(),
            })
            .collect(),
        overall_history: record.overall.entries(),
    };
    serde_json::to_string_pretty(&summary)
}

pub fn render_parsed_json(meta: &ParsedMeta) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(meta)
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/json.rs"]
mod tests;
