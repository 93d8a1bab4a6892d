//! External system integrations for dbfanout.
//!
//! - [`remote`] - SSH command execution and SCP file transfer
//! - [`mariadb`] - MariaDB / MySQL access used by the exporter
//!
//! # Design Pattern
//!
//! Each adapter sits behind a trait ([`remote::RemoteShell`],
//! [`mariadb::DatabaseSource`]) so the orchestration and export logic in
//! [`crate::core`] can be tested with in-memory implementations.
//!
//! ```rust,no_run
//! use dbfanout::adapters::remote::{OpenSshShell, RemoteShell};
//! use dbfanout::config::{RemoteConfig, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let shell = OpenSshShell::new(&RemoteConfig::default());
//! let server = ServerConfig {
//!     label: "db01".to_string(),
//!     ssh_host: "10.0.0.5".to_string(),
//!     ssh_user: "deploy".to_string(),
//!     ssh_key: "~/.ssh/id_ed25519".to_string(),
//! };
//! let output = shell.execute(&server, "uptime").await?;
//! println!("{}", output.stdout);
//! # Ok(())
//! # }
//! ```

pub mod mariadb;
pub mod remote;
