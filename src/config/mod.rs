//! Configuration management for dbfanout.
//!
//! dbfanout reads one TOML file (default `dbfanout.toml`) with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `DBFANOUT_*` environment overrides, including the server list as JSON
//!   in `DBFANOUT_SERVERS_JSON`
//! - Default values for optional settings
//! - Validation on load
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [[servers]]
//! label = "db01"
//! ssh_host = "10.0.0.5"
//! ssh_user = "deploy"
//! ssh_key = "~/.ssh/id_ed25519"
//!
//! [remote]
//! script_dir = "~/run_query"
//! branch = "main"
//!
//! [retrieval]
//! local_dir = "./RetrievedReports"
//!
//! [exporter]
//! sql_file = "query.sql"
//!
//! [exporter.database]
//! host = "localhost"
//! user = "report"
//! password = "${DB_PASSWORD}"
//!
//! [logging]
//! file_path = "orchestration.log"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, DatabaseConfig, ExporterConfig, FanoutConfig, LoggingConfig, RemoteConfig,
    RetrievalConfig, ServerConfig, SYSTEM_SCHEMAS,
};
pub use secret::{secret_string_opt, SecretString, SecretValue};
