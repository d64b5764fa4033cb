//! The `mcqscan preview` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use mcqscan_core::config::load_config_from;
use mcqscan_core::pdf::extract_mcqs_with_stats;

/// Longest question text shown in a table cell.
const MAX_QUESTION_CHARS: usize = 60;

pub fn execute(input: Option<PathBuf>, limit: usize, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let input = input.unwrap_or(config.input);
    let rules = super::compile_rules(&config.rules)?;

    let (records, stats) = extract_mcqs_with_stats(&input, &rules)?;

    if records.is_empty() {
        println!("No MCQs found in {}.", input.display());
    } else {
        let shown = if limit == 0 {
            records.len()
        } else {
            limit.min(records.len())
        };

        let mut table = Table::new();
        table.set_header(vec!["#", "Page", "Options", "Question"]);
        for (i, record) in records.iter().take(shown).enumerate() {
            table.add_row(vec![
                Cell::new(i + 1),
                Cell::new(record.page),
                Cell::new(record.options.len()),
                Cell::new(truncate(&record.question, MAX_QUESTION_CHARS)),
            ]);
        }
        println!("{table}");

        if shown < records.len() {
            println!("... {} more", records.len() - shown);
        }
    }

    println!(
        "{} MCQs, {} discarded without options, {}/{} pages with text",
        records.len(),
        stats.discarded,
        stats.pages - stats.empty_pages,
        stats.pages
    );

    Ok(())
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{head}...")
    }
}
