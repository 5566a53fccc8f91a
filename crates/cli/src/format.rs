//! Load results → human/json string formatting.
//!
//! - **Human** (default): one line per collection, one line per failure
//! - **JSON** (`--json`): `serde_json::to_string_pretty`

use std::fmt::Display;

use fixturedb_engine::{CountMismatch, LoadSummary};

/// Output formatting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

/// Format a load summary.
pub fn format_summary(summary: &LoadSummary, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => serde_json::to_string_pretty(summary)
            .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e)),
        OutputMode::Human => format_summary_human(summary),
    }
}

fn format_summary_human(summary: &LoadSummary) -> String {
    let mut lines = vec![format!(
        "load {}: {} inserted, {} failed",
        summary.load_id, summary.total_inserted, summary.total_failed
    )];
    let width = summary
        .per_collection_inserted
        .keys()
        .map(|c| c.len())
        .max()
        .unwrap_or(0);
    for (collection, inserted) in &summary.per_collection_inserted {
        lines.push(format!("  {:<width$}  {}", collection, inserted, width = width));
    }
    for failure in summary.failures() {
        lines.push(format!("(failed) {}: {}", failure.uri, failure.error));
    }
    lines.join("\n")
}

/// Format the result of count verification. Empty when every count matched
/// and the mode is human.
pub fn format_mismatches(mismatches: &[CountMismatch], mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => serde_json::to_string_pretty(&serde_json::json!({
            "mismatches": mismatches
        }))
        .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e)),
        OutputMode::Human => mismatches
            .iter()
            .map(|m| {
                format!(
                    "(mismatch) {}: expected {}, found {}",
                    m.collection, m.expected, m.actual
                )
            })
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Format the full report of a `load` invocation: every summary, then the
/// verification result.
pub fn format_report(
    summaries: &[LoadSummary],
    mismatches: &[CountMismatch],
    mode: OutputMode,
) -> String {
    match mode {
        OutputMode::Json => serde_json::to_string_pretty(&serde_json::json!({
            "loads": summaries,
            "mismatches": mismatches,
        }))
        .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e)),
        OutputMode::Human => summaries
            .iter()
            .map(|s| format_summary(s, mode))
            .chain(std::iter::once(format_mismatches(mismatches, mode)))
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Format an error.
pub fn format_error(err: &dyn Display, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => serde_json::to_string_pretty(&serde_json::json!({
            "error": err.to_string()
        }))
        .unwrap_or_else(|_| format!("{{\"error\": \"{}\"}}", err)),
        OutputMode::Human => format!("(error) {}", err),
    }
}
