//! mcqscan CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(
    name = "mcqscan",
    version,
    about = "Extract multiple-choice questions from textbook PDFs"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract questions from a PDF and write a report
    Extract {
        /// Input PDF (default from config)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Report path (default from config)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Report format: text, json
        #[arg(long)]
        format: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show extracted questions as a table without writing a report
    Preview {
        /// Input PDF (default from config)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Maximum rows to show (0 = all)
        #[arg(long, default_value = "20")]
        limit: usize,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check that the scan rules in a config file compile
    Validate {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter config (and optionally a sample PDF)
    Init {
        /// Also write sample.pdf
        #[arg(long)]
        sample: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mcqscan=info,mcqscan_core=info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            input,
            output,
            format,
            config,
        } => commands::extract::execute(input, output, format, config),
        Commands::Preview {
            input,
            limit,
            config,
        } => commands::preview::execute(input, limit, config),
        Commands::Validate { config } => commands::validate::execute(config),
        Commands::Init { sample } => commands::init::execute(sample),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
