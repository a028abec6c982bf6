//! Jobview Ingest - workbook inspection tool

use anyhow::Result;
use clap::{Parser, Subcommand};
use jobview_common::{
    logging::{init_logging, LogConfig, LogLevel},
    JobviewError,
};
use jobview_ingest::{load, LoadOutcome};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "jobview-ingest")]
#[command(author, version, about = "Inspect job-log workbooks the way the server loads them")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a workbook and report its normalized columns and row count
    Inspect {
        /// Workbook to load
        #[arg(short, long, env = "JOBVIEW_WORKBOOK", default_value = "jobs.xlsx")]
        workbook: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };

    // Environment variables take precedence over the flag
    let log_config = LogConfig::builder()
        .level(log_level)
        .log_file_prefix("jobview-ingest")
        .build()
        .merge_env()?;

    let _guard = init_logging(&log_config)?;

    match cli.command {
        Command::Inspect { workbook } => inspect(workbook),
    }
}

fn inspect(workbook: PathBuf) -> Result<()> {
    info!(path = %workbook.display(), "Inspecting workbook");

    match load(&workbook) {
        LoadOutcome::Loaded(table) => {
            info!(
                rows = table.len(),
                columns = ?table.columns(),
                "Workbook is loadable"
            );
            Ok(())
        },
        LoadOutcome::LoadFailed { reason } => Err(JobviewError::Workbook(reason).into()),
    }
}
