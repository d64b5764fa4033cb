//! The `mcqscan init` command.

use std::path::Path;

use anyhow::{Context, Result};

use mcqscan_core::config::CONFIG_FILE;
use mcqscan_core::sample::sample_pdf;

const SAMPLE_FILE: &str = "sample.pdf";

pub fn execute(sample: bool) -> Result<()> {
    if Path::new(CONFIG_FILE).exists() {
        println!("{CONFIG_FILE} already exists, skipping.");
    } else {
        std::fs::write(CONFIG_FILE, SAMPLE_CONFIG)?;
        println!("Created {CONFIG_FILE}");
    }

    if sample {
        if Path::new(SAMPLE_FILE).exists() {
            println!("{SAMPLE_FILE} already exists, skipping.");
        } else {
            let bytes = sample_pdf().context("failed to build sample PDF")?;
            std::fs::write(SAMPLE_FILE, bytes)?;
            println!("Created {SAMPLE_FILE}");
        }
    }

    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to match your textbook's layout");
    println!("  2. Run: mcqscan validate");
    if sample {
        println!("  3. Run: mcqscan extract --input {SAMPLE_FILE}");
    } else {
        println!("  3. Run: mcqscan extract --input <book.pdf>");
    }

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# mcqscan configuration

input = "Class_9_Science_English_Medium-2024_Edition-www.tntextbooks.in.pdf"
output = "extracted_mcqs.txt"
format = "text"

[rules]
# A line matching any of these (case-insensitive, anywhere in the line)
# starts a new question.
question_patterns = [
    'choose\s+the\s+correct\s+answer',
    'fill\s+in\s+the\s+blanks',
    'select\s+the\s+correct\s+answer',
    'which\s+of\s+the\s+following',
    'correct\s+option',
]

# Characters allowed in option labels such as "a)" or "iv)".
label_class = "a-divx"

# Lines starting with these are never appended to the question text.
continuation_guards = ["a)", "b)", "c)", "d)", "i)", "ii)", "iii)", "iv)"]
"#;
