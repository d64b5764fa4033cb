//! mcqscan-report: text and JSON reports for extracted questions.

pub mod json;
pub mod text;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::Result;

use mcqscan_core::model::QuestionRecord;

/// Output format of a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!("unknown report format: {other} (expected text or json)")),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

/// Write `records` to `path` in the given format.
pub fn write_report(
    records: &[QuestionRecord],
    source: &Path,
    path: &Path,
    format: ReportFormat,
) -> Result<()> {
    match format {
        ReportFormat::Text => text::write_text_report(records, path),
        ReportFormat::Json => json::write_json_report(records, source, path),
    }
}
