//! Rashomon - narrative discovery and agreement scoring over a news corpus.

use anyhow::Context;
use clap::Parser;
use rashomon_cli::commands;
use rashomon_cli::{Cli, Command, Config, Formatter};
use std::path::Path;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays clean for formatted output
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Load or create config
    let config = match cli.config.as_deref() {
        Some(path) => Config::load_from(Path::new(path))
            .with_context(|| format!("failed to load config from {}", path))?,
        None => Config::load().unwrap_or_else(|_| {
            let cfg = Config::default();
            cfg.save().ok();
            cfg
        }),
    };

    // Determine output format and color setting
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let client = commands::build_client(cli.api_key, &config.pipeline)
        .context("failed to build model client")?;

    match cli.command {
        Command::Discover(args) => {
            commands::execute_discover(args, client, &config, &formatter).await?;
        }
        Command::Score(args) => {
            commands::execute_score(args, client, &config, &formatter).await?;
        }
        Command::Run(args) => {
            commands::execute_run(args, client, &config, &formatter).await?;
        }
    }

    Ok(())
}
