//! Remote shell abstraction
//!
//! The orchestrator talks to hosts only through [`RemoteShell`], so the
//! per-host procedure can be exercised without a network.

use crate::config::ServerConfig;
use crate::domain::errors::RemoteError;
use async_trait::async_trait;
use std::path::Path;

/// Captured result of one ssh or scp invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code; `None` when the process was killed by a signal
    pub status: Option<i32>,

    /// Standard output, decoded lossily
    pub stdout: String,

    /// Standard error, decoded lossily
    pub stderr: String,
}

impl CommandOutput {
    /// Whether the process exited with code 0
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// Exit code for log lines
    pub fn status_label(&self) -> String {
        match self.status {
            Some(code) => code.to_string(),
            None => "signal".to_string(),
        }
    }
}

/// Executes commands on, and copies files from, a host
#[async_trait]
pub trait RemoteShell: Send + Sync {
    /// Run `command` in one SSH session on `server`
    ///
    /// # Errors
    ///
    /// Returns an error only if the session could not be started; a non-zero
    /// exit status is reported through [`CommandOutput::status`].
    async fn execute(&self, server: &ServerConfig, command: &str)
        -> Result<CommandOutput, RemoteError>;

    /// Copy `remote_path` from `server` into `local_dir`, keeping the file name
    ///
    /// # Errors
    ///
    /// Same contract as [`RemoteShell::execute`].
    async fn fetch(
        &self,
        server: &ServerConfig,
        remote_path: &str,
        local_dir: &Path,
    ) -> Result<CommandOutput, RemoteError>;

    /// Human-readable form of the ssh invocation, for dry runs and debug logs
    fn describe_execute(&self, server: &ServerConfig, command: &str) -> String {
        format!("ssh -i {} {} {}", server.ssh_key, server.destination(), command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_output_success() {
        let output = CommandOutput {
            status: Some(0),
            ..Default::default()
        };
        assert!(output.success());
        assert_eq!(output.status_label(), "0");
    }

    #[test]
    fn test_command_output_failure() {
        let failed = CommandOutput {
            status: Some(255),
            ..Default::default()
        };
        assert!(!failed.success());
        assert_eq!(failed.status_label(), "255");

        let killed = CommandOutput::default();
        assert!(!killed.success());
        assert_eq!(killed.status_label(), "signal");
    }
}
