//! Orchestrate command implementation
//!
//! This module implements the `orchestrate` command, which runs the remote
//! exporter on every configured server and copies the reports back.

use crate::adapters::remote::OpenSshShell;
use crate::config::FanoutConfig;
use crate::core::orchestrate::Orchestrator;
use clap::Args;
use std::sync::Arc;

/// Arguments for the orchestrate command
#[derive(Args, Debug)]
pub struct OrchestrateArgs {
    /// Dry run mode - log the SSH commands without running them
    #[arg(long)]
    pub dry_run: bool,

    /// Only process these server labels (comma-separated)
    #[arg(long, value_name = "LABELS")]
    pub server: Option<String>,
}

impl OrchestrateArgs {
    /// Labels passed with `--server`, empty when all servers run
    pub fn server_labels(&self) -> Vec<String> {
        self.server
            .as_deref()
            .map(|s| {
                s.split(',')
                    .map(|label| label.trim().to_string())
                    .filter(|label| !label.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Execute the orchestrate command
    ///
    /// Host failures are logged and never change the exit code.
    pub async fn execute(&self, config: &FanoutConfig) -> anyhow::Result<i32> {
        tracing::info!("Starting orchestrate command");

        let servers = match config.select_servers(&self.server_labels()) {
            Ok(servers) => servers,
            Err(e) => {
                tracing::error!(error = %e, "Invalid server selection");
                eprintln!("Invalid server selection: {e}");
                return Ok(2);
            }
        };

        if servers.is_empty() {
            tracing::warn!("No servers configured; nothing to do");
        }

        let dry_run = self.dry_run || config.application.dry_run;
        if dry_run {
            tracing::info!("Dry run enabled; no remote commands will be executed");
        }

        let shell = Arc::new(OpenSshShell::new(&config.remote));
        let orchestrator = Orchestrator::new(config, shell)
            .with_servers(servers)
            .with_dry_run(dry_run);

        let summary = orchestrator.run().await?;

        println!();
        println!("Orchestration Summary:");
        println!("  Servers: {}", summary.hosts.len());
        println!("  Reports fetched: {}", summary.fetched());
        println!("  Missing marker: {}", summary.marker_missing());
        println!("  Failed: {}", summary.failed());
        if dry_run {
            println!("  Skipped (dry run): {}", summary.skipped());
        }
        println!("  Retrieval directory: {}", orchestrator.local_dir().display());
        println!("  Duration: {:.2}s", summary.duration.as_secs_f64());

        Ok(0)
    }
}
