//! Plain-text report generator.
//!
//! One block per question:
//!
//! ```text
//! Question 1:
//! Choose the correct answer
//!
//! Options:
//! - a. Paris
//! - b. London
//!
//! ================================================================================
//!
//! ```

use anyhow::{Context, Result};
use std::path::Path;

use mcqscan_core::model::QuestionRecord;

/// Width of the `=` rule closing each question block.
pub const SEPARATOR_WIDTH: usize = 80;

/// Generate the text report for `records`, numbering questions from 1.
pub fn generate_text(records: &[QuestionRecord]) -> String {
    let separator = "=".repeat(SEPARATOR_WIDTH);
    let mut out = String::new();

    for (i, record) in records.iter().enumerate() {
        out.push_str(&format!("Question {}:\n{}\n\n", i + 1, record.question));
        out.push_str("Options:\n");
        for option in &record.options {
            out.push_str(&format!("- {option}\n"));
        }
        out.push_str(&format!("\n{separator}\n\n"));
    }

    out
}

/// Write the text report to `path`, replacing any existing file.
pub fn write_text_report(records: &[QuestionRecord], path: &Path) -> Result<()> {
    let text = generate_text(records);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, text)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(())
}
