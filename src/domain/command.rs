//! The shell command sequence run on every host

use crate::config::RemoteConfig;

/// Ordered shell commands executed as one `&&`-joined string
///
/// The order is fixed: enter the checkout, update it, switch branch, prepare
/// the exporter, run it. A failing step stops the chain, so the exporter only
/// runs on an up-to-date build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteCommandSequence {
    steps: Vec<String>,
}

impl RemoteCommandSequence {
    /// Build the standard sequence for a remote configuration
    pub fn from_config(remote: &RemoteConfig) -> Self {
        let mut steps = vec![
            format!("cd {}", remote.script_dir),
            "git pull".to_string(),
            format!("git switch {}", remote.branch),
        ];
        steps.extend(remote.setup_commands.iter().cloned());
        steps.push(remote.exporter_command.clone());
        Self { steps }
    }

    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    /// The single command string passed to ssh
    pub fn joined(&self) -> String {
        self.steps.join(" && ")
    }
}
