//! [`RemoteShell`] backed by the OpenSSH `ssh` and `scp` binaries

use super::traits::{CommandOutput, RemoteShell};
use crate::config::{RemoteConfig, ServerConfig};
use crate::domain::errors::RemoteError;
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

/// Runs ssh/scp as child processes and captures their output
#[derive(Debug, Clone)]
pub struct OpenSshShell {
    ssh_program: String,
    scp_program: String,
    options: Vec<String>,
}

impl OpenSshShell {
    pub fn new(remote: &RemoteConfig) -> Self {
        Self {
            ssh_program: remote.ssh_program.clone(),
            scp_program: remote.scp_program.clone(),
            options: remote.ssh_options.clone(),
        }
    }

    fn base_args(&self, server: &ServerConfig) -> Result<Vec<OsString>, RemoteError> {
        let key = expand_home(&server.ssh_key)?;
        let mut args: Vec<OsString> = vec!["-i".into(), key.into_os_string()];
        args.extend(self.options.iter().map(OsString::from));
        Ok(args)
    }

    async fn run(&self, program: &str, args: Vec<OsString>) -> Result<CommandOutput, RemoteError> {
        tracing::debug!(program = %program, args = ?args, "Spawning process");

        let output = Command::new(program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    RemoteError::BinaryMissing {
                        program: program.to_string(),
                    }
                } else {
                    RemoteError::SpawnFailed {
                        program: program.to_string(),
                        message: e.to_string(),
                    }
                }
            })?;

        Ok(CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[async_trait]
impl RemoteShell for OpenSshShell {
    async fn execute(
        &self,
        server: &ServerConfig,
        command: &str,
    ) -> Result<CommandOutput, RemoteError> {
        let mut args = self.base_args(server)?;
        args.push(server.destination().into());
        args.push(command.into());
        self.run(&self.ssh_program, args).await
    }

    async fn fetch(
        &self,
        server: &ServerConfig,
        remote_path: &str,
        local_dir: &Path,
    ) -> Result<CommandOutput, RemoteError> {
        let mut args = self.base_args(server)?;
        args.push(format!("{}:{}", server.destination(), remote_path).into());
        args.push(local_dir.as_os_str().to_os_string());
        self.run(&self.scp_program, args).await
    }

    fn describe_execute(&self, server: &ServerConfig, command: &str) -> String {
        let mut parts = vec![self.ssh_program.clone(), "-i".to_string(), server.ssh_key.clone()];
        parts.extend(self.options.iter().cloned());
        parts.push(server.destination());
        parts.push(format!("'{command}'"));
        parts.join(" ")
    }
}

/// Expand a leading `~` to the local home directory
///
/// # Errors
///
/// Returns [`RemoteError::InvalidKeyPath`] when the home directory is unknown
pub fn expand_home(path: &str) -> Result<PathBuf, RemoteError> {
    if path != "~" && !path.starts_with("~/") {
        return Ok(PathBuf::from(path));
    }

    let home = dirs::home_dir().ok_or_else(|| {
        RemoteError::InvalidKeyPath(format!("cannot expand '{path}': home directory unknown"))
    })?;
    let rest = path.trim_start_matches('~').trim_start_matches('/');
    Ok(if rest.is_empty() { home } else { home.join(rest) })
}
