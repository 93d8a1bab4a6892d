//! Orchestrator - runs the exporter on every host and fetches the reports
//!
//! Hosts are handled one after another. A failure on one host is logged and
//! recorded in its [`HostOutcome`]; it never stops the hosts after it.

use super::outcome::{FailureStage, HostOutcome, HostReport, OrchestrationSummary};
use crate::adapters::remote::RemoteShell;
use crate::config::{FanoutConfig, ServerConfig};
use crate::domain::{FanoutError, RemoteCommandSequence, RemoteError, ReportMarker, Result};
use crate::{log_host_start, log_process_failure};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Sequential fan-out over the configured servers
pub struct Orchestrator {
    servers: Vec<ServerConfig>,
    remote_dir: String,
    sequence: RemoteCommandSequence,
    local_dir: PathBuf,
    dry_run: bool,
    shell: Arc<dyn RemoteShell>,
}

impl Orchestrator {
    /// Create an orchestrator for every server in `config`
    pub fn new(config: &FanoutConfig, shell: Arc<dyn RemoteShell>) -> Self {
        Self {
            servers: config.servers.clone(),
            remote_dir: config.remote.script_dir.clone(),
            sequence: RemoteCommandSequence::from_config(&config.remote),
            local_dir: PathBuf::from(&config.retrieval.local_dir),
            dry_run: config.application.dry_run,
            shell,
        }
    }

    /// Replace the server list (e.g. a `--server` selection)
    pub fn with_servers(mut self, servers: Vec<ServerConfig>) -> Self {
        self.servers = servers;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn servers(&self) -> &[ServerConfig] {
        &self.servers
    }

    pub fn local_dir(&self) -> &Path {
        &self.local_dir
    }

    /// Process every server in list order
    ///
    /// # Errors
    ///
    /// Returns an error only if the local retrieval directory cannot be
    /// created. Host failures are reported in the summary.
    pub async fn run(&self) -> Result<OrchestrationSummary> {
        let start_time = Instant::now();

        std::fs::create_dir_all(&self.local_dir).map_err(|e| {
            FanoutError::Io(format!(
                "Failed to create retrieval directory {}: {}",
                self.local_dir.display(),
                e
            ))
        })?;

        tracing::info!(
            servers = self.servers.len(),
            local_dir = %self.local_dir.display(),
            dry_run = self.dry_run,
            "=== Starting orchestration job ==="
        );

        let mut hosts = Vec::with_capacity(self.servers.len());
        for server in &self.servers {
            let outcome = self.process_host(server).await;
            hosts.push(HostReport {
                label: server.label.clone(),
                outcome,
            });
        }

        let summary = OrchestrationSummary {
            hosts,
            duration: start_time.elapsed(),
        };
        summary.log_summary();
        tracing::info!("=== Orchestration job completed ===");
        Ok(summary)
    }

    /// Run the command sequence on one host and fetch its report
    pub async fn process_host(&self, server: &ServerConfig) -> HostOutcome {
        let label = &server.label;
        log_host_start!(label, server.destination());

        let command = self.sequence.joined();
        if self.dry_run {
            tracing::info!(
                host = %label,
                command = %self.shell.describe_execute(server, &command),
                "Dry run: remote command not executed"
            );
            return HostOutcome::Skipped;
        }
        tracing::debug!(host = %label, command = %command, "Remote command");

        let output = match self.shell.execute(server, &command).await {
            Ok(output) => output,
            Err(e) => return Self::spawn_failure(label, FailureStage::Connect, e),
        };

        if !output.success() {
            log_process_failure!(label, "Remote command", output);
            return HostOutcome::Failed {
                stage: FailureStage::RemoteCommand,
                message: format!("exit code {}", output.status_label()),
            };
        }
        tracing::info!(host = %label, "Remote execution succeeded");

        let marker = ReportMarker::find(&output.stdout);
        if let Some(ref marker) = marker {
            tracing::info!(host = %label, report = %marker.relative_path, "Found REPORT_PATH");
        }
        if !output.stderr.trim().is_empty() {
            tracing::warn!(host = %label, "Remote stderr:\n{}", output.stderr.trim());
        }

        let Some(marker) = marker else {
            tracing::error!(host = %label, "No REPORT_PATH marker; skipping fetch");
            return HostOutcome::MarkerMissing;
        };

        let remote_path = marker.remote_path(&self.remote_dir);
        tracing::info!(host = %label, remote_path = %remote_path, "Fetching report via SCP");

        let transfer = match self.shell.fetch(server, &remote_path, &self.local_dir).await {
            Ok(output) => output,
            Err(e) => return Self::spawn_failure(label, FailureStage::Transfer, e),
        };

        if !transfer.success() {
            log_process_failure!(label, "SCP", transfer);
            return HostOutcome::Failed {
                stage: FailureStage::Transfer,
                message: format!("exit code {}", transfer.status_label()),
            };
        }
        if !transfer.stderr.trim().is_empty() {
            tracing::warn!(host = %label, "SCP stderr:\n{}", transfer.stderr.trim());
        }

        let local_path = match Path::new(&remote_path).file_name() {
            Some(name) => self.local_dir.join(name),
            None => self.local_dir.clone(),
        };
        tracing::info!(
            host = %label,
            local_path = %local_path.display(),
            "SCP succeeded; report saved"
        );

        if let Some(ref outcome) = marker.outcome {
            tracing::info!(
                host = %label,
                databases_scanned = outcome.databases_scanned,
                databases_exported = outcome.databases_exported,
                rows_written = outcome.rows_written,
                failed_databases = ?outcome.failed_databases,
                "Remote export result"
            );
        }

        HostOutcome::Fetched {
            local_path,
            outcome: marker.outcome,
        }
    }

    fn spawn_failure(label: &str, stage: FailureStage, error: RemoteError) -> HostOutcome {
        match error {
            RemoteError::BinaryMissing { .. } => {
                tracing::error!(host = %label, stage = %stage, error = %error, "SSH/SCP binary missing");
            }
            _ => {
                tracing::error!(host = %label, stage = %stage, error = %error, "Unexpected error");
            }
        }
        HostOutcome::Failed {
            stage,
            message: error.to_string(),
        }
    }
}
