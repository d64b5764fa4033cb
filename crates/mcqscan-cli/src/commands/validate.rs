//! The `mcqscan validate` command.

use std::path::PathBuf;

use anyhow::Result;

use mcqscan_core::config::load_config_from;
use mcqscan_core::rules::validate_rules;

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    super::compile_rules(&config.rules)?;

    let rules = &config.rules;
    println!(
        "Rules: {} question pattern(s), label class [{}], {} continuation guard(s)",
        rules.question_patterns.len(),
        rules.label_class,
        rules.continuation_guards.len()
    );

    let warnings = validate_rules(rules);
    for w in &warnings {
        println!("  WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Rules valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
