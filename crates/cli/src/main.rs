//! sleuth command-line entry point.
//!
//! Results go to stdout as JSON; logs go to stderr.

use anyhow::Context;
use clap::Parser;
use sleuth_client::ResearchAssistant;
use sleuth_core::AppConfig;

mod cli;
mod commands;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("sleuth error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let mut config = AppConfig::load().context("failed to load configuration")?;
    if let Some(dir) = cli.cache_dir {
        config.cache_dir = dir;
    }

    let mut assistant =
        ResearchAssistant::from_config(&config).context("failed to initialize research assistant")?;

    commands::dispatch(cli.command, &mut assistant, cli.format).await
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("SLEUTH_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
