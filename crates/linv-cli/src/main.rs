mod cli;
mod error;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use linv_core::{InventoryConfig, LinodeSource};

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // stdout carries the inventory, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
        Err(e) => e.exit(),
    };

    match execute(cli.command()).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "inventory failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn execute(command: Command) -> Result<String, CliError> {
    let source = LinodeSource::from_env()?;
    let config = InventoryConfig::from_env();
    tracing::debug!(?config, "inventory config loaded");

    let document = linv_core::run(&source, &config).await?;

    let output = match command {
        Command::List => document.to_json()?,
        Command::Host(address) => match document.lookup_host(&address) {
            Some(entry) => serde_json::to_string_pretty(entry)?,
            None => {
                tracing::warn!(%address, "host not found in inventory");
                "{}".to_string()
            }
        },
    };

    Ok(output)
}
