//! Export command implementation
//!
//! This module implements the `export` command, which runs on a database
//! host: one query against every user database, merged into one CSV. The
//! report location is printed on stdout as marker lines for the orchestrator.

use crate::adapters::mariadb::MariaDbSource;
use crate::config::FanoutConfig;
use crate::core::export::RemoteExporter;
use crate::domain::FanoutError;
use clap::Args;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Override the SQL file to run
    #[arg(long, value_name = "PATH")]
    pub sql_file: Option<String>,

    /// Override the directory the report is written to
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<String>,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config: &FanoutConfig) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let Some(mut exporter_config) = config.exporter.clone() else {
            tracing::error!("Missing [exporter] section");
            eprintln!("Configuration error: the export command needs an [exporter] section");
            return Ok(2);
        };

        if let Some(sql_file) = &self.sql_file {
            tracing::info!(sql_file = %sql_file, "Overriding SQL file from CLI");
            exporter_config.sql_file = sql_file.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            tracing::info!(output_dir = %output_dir, "Overriding output directory from CLI");
            exporter_config.output_dir = output_dir.clone();
        }

        if let Err(e) = exporter_config.validate() {
            tracing::error!(error = %e, "Exporter configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        let database_config = exporter_config.database.clone();
        let exporter = RemoteExporter::new(exporter_config);

        let query = match exporter.load_query() {
            Ok(query) => query,
            Err(e) => return Ok(Self::fail(&e, "Failed to load SQL query")),
        };

        let mut source = match MariaDbSource::connect(&database_config).await {
            Ok(source) => source,
            Err(e) => return Ok(Self::fail(&e, "Failed to connect to database")),
        };

        let today = chrono::Local::now().date_naive();
        let result = exporter.export(&mut source, &query, today).await;
        source.close().await;

        match result {
            Ok(outcome) => {
                for line in outcome.marker_lines() {
                    println!("{line}");
                }
                Ok(0)
            }
            Err(e) => Ok(Self::fail(&e, "Export failed")),
        }
    }

    fn fail(error: &FanoutError, context: &str) -> i32 {
        crate::log_error_with_context!(error, context);
        eprintln!("{context}: {error}");
        error.exit_code()
    }
}
