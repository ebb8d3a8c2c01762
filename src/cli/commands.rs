// src/cli/commands.rs
use super::{AddLogArgs, AnalyzeArgs};
use crate::analyzer::{create_checker, Dispatcher, InvalidStatus, Status};
use crate::config::Settings;
use crate::metrics::MetricsRegistry;
use crate::report;
use crate::store::{self, LogDescriptor};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

/// Validated `analyze` arguments.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    pub config: PathBuf,
    pub output: Option<PathBuf>,
    pub filter: Option<Status>,
    pub timestamped: bool,
    pub metrics: Option<PathBuf>,
}

impl TryFrom<AnalyzeArgs> for AnalyzeOptions {
    type Error = InvalidStatus;

    fn try_from(args: AnalyzeArgs) -> Result<Self, Self::Error> {
        let filter = args.status.as_deref().map(str::parse::<Status>).transpose()?;

        Ok(Self {
            config: args.config,
            output: args.output,
            filter,
            timestamped: args.timestamp,
            metrics: args.metrics,
        })
    }
}

#[derive(Debug, Clone)]
pub struct AddLogOptions {
    pub descriptor: LogDescriptor,
    pub file: PathBuf,
}

impl From<AddLogArgs> for AddLogOptions {
    fn from(args: AddLogArgs) -> Self {
        Self {
            descriptor: LogDescriptor::new(args.id, args.path, args.kind),
            file: args.file,
        }
    }
}

pub async fn run_analyze(options: AnalyzeOptions, settings: &Settings) -> Result<()> {
    println!("Loading descriptors from: {}", options.config.display());
    let descriptors = store::load(&options.config)
        .await
        .context("Failed to load descriptors")?;

    if descriptors.is_empty() {
        println!("No logs to analyze in the configuration.");
        return Ok(());
    }

    println!("Logs to analyze: {}", descriptors.len());

    let registry = MetricsRegistry::new()?;
    let dispatcher = Dispatcher::new(create_checker(settings))
        .with_timeout(settings.check_timeout())
        .with_metrics(registry.collector());

    println!("\nStarting concurrent analysis...");
    let results = dispatcher.dispatch(&descriptors, options.filter).await;

    println!();
    print!("{}", report::render_results(&results));

    if let Some(output) = &options.output {
        let written = report::export(&results, output, options.timestamped)
            .await
            .context("Failed to export results")?;
        println!("Results exported to: {}", written.display());
    }

    if let Some(path) = &options.metrics {
        tokio::fs::write(path, registry.gather()?)
            .await
            .with_context(|| format!("Failed to write metrics to {}", path.display()))?;
        info!("Metrics written to {}", path.display());
    }

    match options.filter {
        Some(status) => println!("\nAnalysis finished. Results filtered by status: {}", status),
        None => println!("\nAnalysis finished."),
    }

    Ok(())
}

pub async fn run_add_log(options: AddLogOptions) -> Result<()> {
    let id = options.descriptor.id.clone();

    store::append(options.descriptor, &options.file)
        .await
        .with_context(|| format!("Failed to add log '{}'", id))?;

    println!(
        "Log '{}' added to configuration '{}'.",
        id,
        options.file.display()
    );
    Ok(())
}
