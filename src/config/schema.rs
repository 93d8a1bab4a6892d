//! Configuration schema types
//!
//! This module defines the configuration structure for dbfanout. A single
//! file serves both roles: the orchestrator reads `servers`, `remote` and
//! `retrieval`; the exporter running on each host reads `exporter`.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Databases that are never exported
pub const SYSTEM_SCHEMAS: [&str; 4] = ["information_schema", "mysql", "performance_schema", "sys"];

/// Main dbfanout configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FanoutConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Hosts to fan out to, processed in list order
    #[serde(default)]
    pub servers: Vec<ServerConfig>,

    /// How the remote exporter is launched
    #[serde(default)]
    pub remote: RemoteConfig,

    /// Where fetched reports land locally
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Exporter settings (required on hosts that run `dbfanout export`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exporter: Option<ExporterConfig>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl FanoutConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;

        let mut labels = HashSet::new();
        for server in &self.servers {
            server.validate()?;
            if !labels.insert(server.label.as_str()) {
                return Err(format!("Duplicate server label '{}'", server.label));
            }
        }

        self.remote.validate()?;
        self.retrieval.validate()?;
        if let Some(ref exporter) = self.exporter {
            exporter.validate()?;
        }
        self.logging.validate()?;
        Ok(())
    }

    /// Restricts the server list to the given labels, keeping list order
    ///
    /// An empty selection keeps every server.
    ///
    /// # Errors
    ///
    /// Returns an error naming any label that is not configured
    pub fn select_servers(&self, labels: &[String]) -> Result<Vec<ServerConfig>, String> {
        if labels.is_empty() {
            return Ok(self.servers.clone());
        }

        let unknown: Vec<&str> = labels
            .iter()
            .filter(|label| !self.servers.iter().any(|s| &s.label == *label))
            .map(String::as_str)
            .collect();
        if !unknown.is_empty() {
            return Err(format!("Unknown server label(s): {}", unknown.join(", ")));
        }

        Ok(self
            .servers
            .iter()
            .filter(|s| labels.contains(&s.label))
            .cloned()
            .collect())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (log remote commands without running them)
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// One host reachable over SSH
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Human-readable name used in log lines
    pub label: String,

    /// Hostname or IP address
    pub ssh_host: String,

    /// Remote login user
    pub ssh_user: String,

    /// Private key path; a leading `~` is expanded locally
    pub ssh_key: String,
}

impl ServerConfig {
    /// `user@host` as passed to ssh and scp
    pub fn destination(&self) -> String {
        format!("{}@{}", self.ssh_user, self.ssh_host)
    }

    fn validate(&self) -> Result<(), String> {
        if self.label.trim().is_empty() {
            return Err("servers[].label cannot be empty".to_string());
        }
        if self.ssh_host.trim().is_empty() {
            return Err(format!("servers[{}].ssh_host cannot be empty", self.label));
        }
        if self.ssh_user.trim().is_empty() {
            return Err(format!("servers[{}].ssh_user cannot be empty", self.label));
        }
        if self.ssh_key.trim().is_empty() {
            return Err(format!("servers[{}].ssh_key cannot be empty", self.label));
        }
        Ok(())
    }
}

/// Remote execution settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Checkout of this project on every host
    #[serde(default = "default_script_dir")]
    pub script_dir: String,

    /// Branch switched to before the exporter runs
    #[serde(default = "default_branch")]
    pub branch: String,

    /// Commands that prepare the exporter (build, install dependencies)
    #[serde(default = "default_setup_commands")]
    pub setup_commands: Vec<String>,

    /// Command that runs the exporter inside `script_dir`
    #[serde(default = "default_exporter_command")]
    pub exporter_command: String,

    /// Extra options passed to both ssh and scp (e.g. `-o BatchMode=yes`)
    #[serde(default)]
    pub ssh_options: Vec<String>,

    /// ssh executable
    #[serde(default = "default_ssh_program")]
    pub ssh_program: String,

    /// scp executable
    #[serde(default = "default_scp_program")]
    pub scp_program: String,
}

impl RemoteConfig {
    fn validate(&self) -> Result<(), String> {
        if self.script_dir.trim().is_empty() {
            return Err("remote.script_dir cannot be empty".to_string());
        }
        if self.branch.trim().is_empty() {
            return Err("remote.branch cannot be empty".to_string());
        }
        if self.exporter_command.trim().is_empty() {
            return Err("remote.exporter_command cannot be empty".to_string());
        }
        if self.setup_commands.iter().any(|c| c.trim().is_empty()) {
            return Err("remote.setup_commands cannot contain empty commands".to_string());
        }
        if self.ssh_program.trim().is_empty() || self.scp_program.trim().is_empty() {
            return Err("remote.ssh_program and remote.scp_program cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            script_dir: default_script_dir(),
            branch: default_branch(),
            setup_commands: default_setup_commands(),
            exporter_command: default_exporter_command(),
            ssh_options: Vec::new(),
            ssh_program: default_ssh_program(),
            scp_program: default_scp_program(),
        }
    }
}

/// Local retrieval settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Directory fetched reports are copied into
    #[serde(default = "default_local_dir")]
    pub local_dir: String,
}

impl RetrievalConfig {
    fn validate(&self) -> Result<(), String> {
        if self.local_dir.trim().is_empty() {
            return Err("retrieval.local_dir cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            local_dir: default_local_dir(),
        }
    }
}

/// Exporter settings, read on the database host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExporterConfig {
    /// File holding the SQL query run against every database
    pub sql_file: String,

    /// Directory the CSV report is written to
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Host identifier used in the report name (defaults to the hostname)
    #[serde(default)]
    pub host_label: Option<String>,

    /// Databases skipped in addition to [`SYSTEM_SCHEMAS`]
    #[serde(default)]
    pub exclude_databases: Vec<String>,

    /// Connection to the local database server
    pub database: DatabaseConfig,
}

impl ExporterConfig {
    /// Whether a database is left out of the export
    pub fn is_excluded(&self, database: &str) -> bool {
        SYSTEM_SCHEMAS.contains(&database) || self.exclude_databases.iter().any(|d| d == database)
    }

    /// Validates the exporter section
    ///
    /// # Errors
    ///
    /// Returns an error if any exporter value is invalid
    pub fn validate(&self) -> Result<(), String> {
        if self.sql_file.trim().is_empty() {
            return Err("exporter.sql_file cannot be empty".to_string());
        }
        if self.output_dir.trim().is_empty() {
            return Err("exporter.output_dir cannot be empty".to_string());
        }
        if let Some(ref label) = self.host_label {
            if label.trim().is_empty() {
                return Err("exporter.host_label cannot be blank when set".to_string());
            }
        }
        self.database.validate()
    }
}

/// MariaDB / MySQL connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Server host
    #[serde(default = "default_db_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_db_port")]
    pub port: u16,

    /// Login user
    pub user: String,

    /// Login password
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub password: Option<SecretString>,
}

impl DatabaseConfig {
    fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("exporter.database.host cannot be empty".to_string());
        }
        if self.port == 0 {
            return Err("exporter.database.port must be greater than 0".to_string());
        }
        if self.user.trim().is_empty() {
            return Err("exporter.database.user cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Append log lines to `file_path` in addition to the console
    #[serde(default = "default_true")]
    pub file_enabled: bool,

    /// Log file, opened once and appended to
    #[serde(default = "default_log_file")]
    pub file_path: String,

    /// File log format (text or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl LoggingConfig {
    /// Console-only logging, used before a configuration file is available
    pub fn console_only() -> Self {
        Self {
            file_enabled: false,
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<(), String> {
        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.format.as_str()) {
            return Err(format!(
                "Invalid logging.format '{}'. Must be one of: {}",
                self.format,
                valid_formats.join(", ")
            ));
        }
        if self.file_enabled && self.file_path.trim().is_empty() {
            return Err("logging.file_path cannot be empty when file logging is enabled".to_string());
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file_enabled: true,
            file_path: default_log_file(),
            format: default_log_format(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_script_dir() -> String {
    "~/run_query".to_string()
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_setup_commands() -> Vec<String> {
    vec!["cargo build --release --quiet".to_string()]
}

fn default_exporter_command() -> String {
    "./target/release/dbfanout export".to_string()
}

fn default_ssh_program() -> String {
    "ssh".to_string()
}

fn default_scp_program() -> String {
    "scp".to_string()
}

fn default_local_dir() -> String {
    "./RetrievedReports".to_string()
}

fn default_output_dir() -> String {
    "./Output".to_string()
}

fn default_db_host() -> String {
    "localhost".to_string()
}

fn default_db_port() -> u16 {
    3306
}

fn default_log_file() -> String {
    "orchestration.log".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}
