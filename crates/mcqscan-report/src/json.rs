//! JSON report generator.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

use mcqscan_core::model::QuestionRecord;

/// Serialized shape of a JSON report.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    /// Input PDF the questions came from.
    pub source: String,
    pub generated_at: DateTime<Utc>,
    pub count: usize,
    pub questions: Vec<JsonQuestion<'a>>,
}

#[derive(Debug, Serialize)]
pub struct JsonQuestion<'a> {
    /// 1-based position in the report.
    pub number: usize,
    pub page: u32,
    pub question: &'a str,
    pub options: &'a [String],
}

impl<'a> JsonReport<'a> {
    pub fn new(records: &'a [QuestionRecord], source: &Path) -> Self {
        let questions = records
            .iter()
            .enumerate()
            .map(|(i, r)| JsonQuestion {
                number: i + 1,
                page: r.page,
                question: &r.question,
                options: &r.options,
            })
            .collect();

        Self {
            source: source.display().to_string(),
            generated_at: Utc::now(),
            count: records.len(),
            questions,
        }
    }
}

/// Generate the pretty-printed JSON report.
pub fn generate_json(records: &[QuestionRecord], source: &Path) -> Result<String> {
    serde_json::to_string_pretty(&JsonReport::new(records, source))
        .context("failed to serialize report")
}

/// Write the JSON report to `path`, replacing any existing file.
pub fn write_json_report(records: &[QuestionRecord], source: &Path, path: &Path) -> Result<()> {
    let json = generate_json(records, source)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, json)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(())
}
