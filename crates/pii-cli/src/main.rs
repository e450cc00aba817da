mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use pii_config::Config;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so redacted output on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    match cli.command {
        cli::Commands::Init { path, force } => commands::init::handle(path.or(cli.config), force),
        cli::Commands::Serve { host, port } => {
            let config = load_config(cli.config.as_deref())?;
            commands::serve::handle(config, host, port).await
        }
        cli::Commands::Redact(args) => {
            let config = load_config(cli.config.as_deref())?;
            commands::redact::handle(&config, args).await
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}
