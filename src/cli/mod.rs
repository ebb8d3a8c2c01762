// src/cli/mod.rs
//! Command-line surface: argument parsing and the two commands.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

mod commands;

pub use commands::{run_add_log, run_analyze, AddLogOptions, AnalyzeOptions};

use crate::config;

/// Analyze log sources concurrently
#[derive(Parser, Debug)]
#[command(name = "loganalyzer", author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Runtime settings file (YAML, JSON or TOML)
    #[arg(long, value_name = "FILE", global = true, env = "LOGANALYZER_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check every log listed in a descriptor file concurrently
    Analyze(AnalyzeArgs),
    /// Add a log descriptor to a descriptor file, creating it if needed
    AddLog(AddLogArgs),
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Descriptor file listing the logs to analyze
    #[arg(short, long, value_name = "FILE")]
    pub config: PathBuf,

    /// Write the results to this file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Only keep results with this status (OK or FAILED)
    #[arg(long, value_name = "STATUS")]
    pub status: Option<String>,

    /// Prefix the output file name with the current date (YYMMDD)
    #[arg(long)]
    pub timestamp: bool,

    /// Write prometheus metrics for the run to this file
    #[arg(long, value_name = "FILE")]
    pub metrics: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct AddLogArgs {
    /// Unique identifier of the log
    #[arg(long)]
    pub id: String,

    /// Path of the log file
    #[arg(long)]
    pub path: String,

    /// Kind of log (nginx, application, ...)
    #[arg(long = "type", value_name = "TYPE")]
    pub kind: String,

    /// Descriptor file to update
    #[arg(long, value_name = "FILE")]
    pub file: PathBuf,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Analyze(args) => {
                // Reject a bad filter before anything is loaded or spawned
                let options = AnalyzeOptions::try_from(args)?;
                let settings = config::load_settings(self.settings.as_ref())?;
                run_analyze(options, &settings).await
            }
            Commands::AddLog(args) => run_add_log(AddLogOptions::from(args)).await,
        }
    }
}
