//! Per-host results of an orchestration run

use crate::domain::ExportOutcome;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Step at which a host failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    /// ssh could not be started (missing binary, bad key path)
    Connect,
    /// The remote command sequence exited non-zero
    RemoteCommand,
    /// scp could not be started or exited non-zero
    Transfer,
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureStage::Connect => write!(f, "connect"),
            FailureStage::RemoteCommand => write!(f, "remote command"),
            FailureStage::Transfer => write!(f, "transfer"),
        }
    }
}

/// What happened on one host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostOutcome {
    /// The report was copied into the retrieval directory
    Fetched {
        local_path: PathBuf,
        outcome: Option<ExportOutcome>,
    },
    /// The remote run succeeded but printed no report marker
    MarkerMissing,
    /// The host failed; later hosts are unaffected
    Failed { stage: FailureStage, message: String },
    /// Dry run, nothing was executed
    Skipped,
}

/// Outcome for one labelled host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostReport {
    pub label: String,
    pub outcome: HostOutcome,
}

/// Results of one run, in server list order
#[derive(Debug, Clone, Default)]
pub struct OrchestrationSummary {
    pub hosts: Vec<HostReport>,
    pub duration: Duration,
}

impl OrchestrationSummary {
    pub fn fetched(&self) -> usize {
        self.count(|o| matches!(o, HostOutcome::Fetched { .. }))
    }

    pub fn marker_missing(&self) -> usize {
        self.count(|o| matches!(o, HostOutcome::MarkerMissing))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, HostOutcome::Failed { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, HostOutcome::Skipped))
    }

    fn count(&self, predicate: impl Fn(&HostOutcome) -> bool) -> usize {
        self.hosts.iter().filter(|h| predicate(&h.outcome)).count()
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            hosts = self.hosts.len(),
            fetched = self.fetched(),
            marker_missing = self.marker_missing(),
            failed = self.failed(),
            skipped = self.skipped(),
            duration_ms = self.duration.as_millis() as u64,
            "Orchestration finished"
        );
    }
}
