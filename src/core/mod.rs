//! Core logic for dbfanout.
//!
//! # Modules
//!
//! - [`orchestrate`] - Runs the exporter on each host over SSH and fetches reports
//! - [`export`] - The exporter that runs on each host
//!
//! # Workflow
//!
//! 1. **Orchestrate**: for each server, one SSH session runs the remote command
//!    sequence (update checkout, build, run `dbfanout export`)
//! 2. **Export** (remote): list databases, run the query on each, write one CSV,
//!    print the report marker
//! 3. **Fetch**: parse the marker and copy the CSV over SCP
//!
//! # Example
//!
//! ```rust,no_run
//! use dbfanout::adapters::remote::OpenSshShell;
//! use dbfanout::config::load_config;
//! use dbfanout::core::orchestrate::Orchestrator;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("dbfanout.toml")?;
//! let shell = Arc::new(OpenSshShell::new(&config.remote));
//!
//! let summary = Orchestrator::new(&config, shell).run().await?;
//! println!("Fetched: {}", summary.fetched());
//! println!("Failed: {}", summary.failed());
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod orchestrate;
