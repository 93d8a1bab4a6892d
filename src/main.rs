// dbfanout - Run one SQL query across every database on every host
// Copyright (c) 2026 dbfanout Contributors
// Licensed under the MIT License

use anyhow::Context;
use clap::Parser;
use dbfanout::cli::{Cli, Commands};
use dbfanout::config::{load_config, FanoutConfig, LoggingConfig};
use dbfanout::domain::Result as FanoutResult;
use dbfanout::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    // This is optional - if .env doesn't exist, it's silently ignored
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Only orchestrate and export read the file up front; their logging
    // settings come from it
    let loaded: Option<FanoutResult<FanoutConfig>> =
        cli.needs_config().then(|| load_config(&cli.config));

    let (log_level, logging_config) = match loaded {
        Some(Ok(ref config)) => (
            cli.log_level
                .clone()
                .unwrap_or_else(|| config.application.log_level.clone()),
            config.logging.clone(),
        ),
        _ => (
            cli.log_level.clone().unwrap_or_else(|| "info".to_string()),
            LoggingConfig::console_only(),
        ),
    };

    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(e.exit_code());
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "dbfanout - SQL fan-out over SSH"
    );

    let config = match loaded {
        Some(Ok(config)) => Some(config),
        Some(Err(e)) => {
            tracing::error!(error = %e, config_path = %cli.config, "Failed to load configuration");
            eprintln!("Configuration error: {e}");
            drop(guard);
            process::exit(e.exit_code());
        }
        None => None,
    };

    let exit_code = match execute_command(&cli, config.as_ref()).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e:#}");
            5
        }
    };

    // process::exit skips destructors; flush the log file first
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli, config: Option<&FanoutConfig>) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Orchestrate(args) => {
            let config = config.context("Configuration was not loaded")?;
            args.execute(config).await
        }
        Commands::Export(args) => {
            let config = config.context("Configuration was not loaded")?;
            args.execute(config).await
        }
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
    }
}
