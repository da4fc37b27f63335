// LogTally - core/render.rs
//
// Text and JSON rendering of the analysis report.
// Core layer: pure functions returning strings; printing is the caller's job.

use crate::core::model::{Level, LogRecord};
use crate::core::stats::LevelCounts;
use crate::util::constants::{COUNT_COLUMN_WIDTH, LEVEL_COLUMN_WIDTH, TOTAL_ROW_LABEL};
use crate::util::error::RenderError;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::str::FromStr;

// =============================================================================
// Output format
// =============================================================================

/// How the report is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned summary table, then the detail listing.
    #[default]
    Table,
    /// Single pretty-printed JSON document.
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "unknown output format '{other}' (expected 'table' or 'json')"
            )),
        }
    }
}

// =============================================================================
// Report
// =============================================================================

/// Everything one run produces, ready for rendering.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    /// Display form of the analysed file path.
    pub file: String,
    /// Records per level.
    pub counts: LevelCounts,
    /// Sum of `counts`.
    pub total: usize,
    pub lines_processed: u64,
    pub lines_skipped: u64,
    /// Present in detail mode only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<Detail<'a>>,
}

/// Records selected for the detail listing.
#[derive(Debug, Serialize)]
pub struct Detail<'a> {
    pub level: Level,
    pub records: Vec<&'a LogRecord>,
}

/// Render the full report in the requested format.
pub fn render(report: &Report<'_>, format: OutputFormat) -> Result<String, RenderError> {
    match format {
        OutputFormat::Table => Ok(render_text(report)),
        OutputFormat::Json => render_json(report),
    }
}

/// Summary table, followed by a blank line and the detail listing when present.
pub fn render_text(report: &Report<'_>) -> String {
    let mut out = render_summary(&report.counts);
    if let Some(ref detail) = report.detail {
        out.push('\n');
        out.push_str(&render_detail(detail.level, &detail.records));
    }
    out
}

/// Per-level count table in report order, with a total row.
///
/// ```text
/// Level            | Count
/// -----------------|----------
/// INFO             | 1
/// ...
/// -----------------|----------
/// Total            | 3
/// ```
pub fn render_summary(counts: &LevelCounts) -> String {
    let separator = format!(
        "{}|{}",
        "-".repeat(LEVEL_COLUMN_WIDTH + 1),
        "-".repeat(COUNT_COLUMN_WIDTH)
    );

    let mut out = String::new();
    push_row(&mut out, "Level", "Count");
    out.push_str(&separator);
    out.push('\n');
    for (level, count) in counts.iter() {
        push_row(&mut out, level.as_str(), &count.to_string());
    }
    out.push_str(&separator);
    out.push('\n');
    push_row(&mut out, TOTAL_ROW_LABEL, &counts.total().to_string());
    out
}

fn push_row(out: &mut String, label: &str, value: &str) {
    // Writing to a String cannot fail.
    let _ = writeln!(out, "{label:<width$} | {value}", width = LEVEL_COLUMN_WIDTH);
}

/// Heading plus one line per record: `<timestamp> <LEVEL> <message>`.
pub fn render_detail(level: Level, records: &[&LogRecord]) -> String {
    let mut out = format!("Details for log level '{level}':\n");
    if records.is_empty() {
        let _ = writeln!(out, "No entries found for level '{level}'.");
        return out;
    }
    for record in records {
        out.push_str(&record.to_line());
        out.push('\n');
    }
    out
}

/// Pretty JSON with a trailing newline.
pub fn render_json(report: &Report<'_>) -> Result<String, RenderError> {
    let mut json =
        serde_json::to_string_pretty(report).map_err(|e| RenderError::Json { source: e })?;
    json.push('\n');
    Ok(json)
}
