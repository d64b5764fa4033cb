//! The `mcqscan extract` command.

use std::path::PathBuf;

use anyhow::Result;

use mcqscan_core::config::load_config_from;
use mcqscan_core::pdf::extract_mcqs;
use mcqscan_report::{write_report, ReportFormat};

pub fn execute(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    format: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let input = input.unwrap_or(config.input);
    let output = output.unwrap_or(config.output);
    let format: ReportFormat = format
        .as_deref()
        .unwrap_or(&config.format)
        .parse()
        .map_err(|e: String| anyhow::anyhow!("{}", e))?;
    let rules = super::compile_rules(&config.rules)?;
    tracing::debug!(
        input = %input.display(),
        output = %output.display(),
        %format,
        "resolved extract settings"
    );

    println!("Extracting MCQs from {}...", input.display());
    let records = extract_mcqs(&input, &rules)?;

    println!(
        "Found {} MCQs. Saving to {}...",
        records.len(),
        output.display()
    );
    write_report(&records, &input, &output, format)?;

    println!("Done!");
    Ok(())
}
