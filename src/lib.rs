// dbfanout - Run one SQL query across every database on every host
// Copyright (c) 2026 dbfanout Contributors
// Licensed under the MIT License

//! # dbfanout - SQL fan-out over SSH
//!
//! dbfanout runs a single SQL query against every user database on a set of
//! MariaDB/MySQL hosts and collects the results as one CSV per host.
//!
//! ## Overview
//!
//! The crate has two halves that share one configuration file:
//! - **Orchestrate** (local): for each server, run the remote command sequence
//!   over one SSH session, read the report marker from its output, and copy
//!   the report back with SCP
//! - **Export** (remote): list databases, run the query on each non-system
//!   database, merge the rows into one CSV prefixed by database name, and
//!   print the report marker
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Orchestration and export logic
//! - [`adapters`] - External integrations (OpenSSH binaries, MariaDB)
//! - [`domain`] - Errors, the remote command sequence, the report marker
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dbfanout::adapters::remote::OpenSshShell;
//! use dbfanout::config::load_config;
//! use dbfanout::core::orchestrate::Orchestrator;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("dbfanout.toml")?;
//!     let shell = Arc::new(OpenSshShell::new(&config.remote));
//!
//!     let summary = Orchestrator::new(&config, shell).run().await?;
//!
//!     println!("Fetched {} reports", summary.fetched());
//!     Ok(())
//! }
//! ```
//!
//! ## Report marker
//!
//! The exporter prints where it wrote the report, plus a JSON result:
//!
//! ```text
//! REPORT_PATH:./Output/db01_2024_01_01.csv
//! REPORT_RESULT:{"report_path":"./Output/db01_2024_01_01.csv","databases_scanned":3,...}
//! ```
//!
//! ```rust
//! use dbfanout::domain::ReportMarker;
//!
//! let marker = ReportMarker::find("build ok\nREPORT_PATH:./Output/db01_2024_01_01.csv\n").unwrap();
//! assert_eq!(marker.remote_path("~/run_query"), "~/run_query/Output/db01_2024_01_01.csv");
//! ```
//!
//! ## Error Handling
//!
//! dbfanout uses the [`domain::FanoutError`] type for all library errors:
//!
//! ```rust,no_run
//! use dbfanout::domain::FanoutError;
//!
//! fn example() -> Result<(), FanoutError> {
//!     let config = dbfanout::config::load_config("dbfanout.toml")?;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
