//! FLINT CLI - register and activate pipeline definitions.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use flint_engine::observability::{init_tracing, LogFormat};
use std::io::IsTerminal;
use std::path::PathBuf;

/// FLINT - pipeline-activation dispatcher.
#[derive(Parser)]
#[command(name = "flint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register pipeline definitions and activate them
    Run {
        /// Paths to pipeline definition files, registered in order
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Check a pipeline definition without activating it
    Validate {
        /// Path to the pipeline definition file
        file: PathBuf,
    },

    /// Show version information
    Version,
}

fn setup_logging(verbosity: u8) -> Result<()> {
    let filter = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    // Check for explicit log format override, otherwise auto-detect
    let format = std::env::var("FLINT_LOG_FORMAT")
        .ok()
        .and_then(|s| s.parse::<LogFormat>().ok())
        .unwrap_or_else(|| {
            if std::io::stdout().is_terminal() {
                LogFormat::Pretty
            } else {
                LogFormat::Compact
            }
        });

    init_tracing(filter, format)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;

    match cli.command {
        Commands::Run { files } => commands::run::run(&files).await,
        Commands::Validate { file } => commands::validate::run(&file),
        Commands::Version => commands::version::run(),
    }
}
