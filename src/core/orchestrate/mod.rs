//! Fan-out over the configured servers
//!
//! - Running the remote command sequence over SSH
//! - Locating the report marker in remote output
//! - Fetching the report over SCP
//! - Per-host outcomes and the run summary

pub mod coordinator;
pub mod outcome;

pub use coordinator::Orchestrator;
pub use outcome::{FailureStage, HostOutcome, HostReport, OrchestrationSummary};
