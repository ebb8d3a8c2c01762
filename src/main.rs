// src/main.rs
use anyhow::Result;
use clap::Parser;
use log_analyzer::cli::Cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    
    // Initialize tracing; stdout is reserved for the report
    let mut filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("log_analyzer=warn"));
    if cli.verbose {
        filter = filter.add_directive("log_analyzer=debug".parse()?);
    }
    
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    
    cli.run().await
}
