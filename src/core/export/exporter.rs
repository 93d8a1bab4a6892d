//! Remote exporter - runs one query against every user database
//!
//! This is the half of dbfanout that runs on each database host. It writes
//! one merged CSV and reports where it put it.

use super::naming::{report_path, resolve_host_label};
use super::report::MergedReport;
use crate::adapters::mariadb::DatabaseSource;
use crate::config::ExporterConfig;
use crate::domain::{ExportOutcome, FanoutError, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::Path;

/// Exporter for one host
pub struct RemoteExporter {
    config: ExporterConfig,
    host_label: String,
}

impl RemoteExporter {
    /// Create an exporter, resolving the host label used in report names
    pub fn new(config: ExporterConfig) -> Self {
        let host_label = resolve_host_label(&config);
        Self { config, host_label }
    }

    /// Create an exporter with an explicit host label
    pub fn with_host_label(config: ExporterConfig, host_label: impl Into<String>) -> Self {
        Self {
            config,
            host_label: host_label.into(),
        }
    }

    pub fn host_label(&self) -> &str {
        &self.host_label
    }

    /// Read the SQL query from `exporter.sql_file`
    ///
    /// # Errors
    ///
    /// Returns [`FanoutError::QueryFile`] if the file cannot be read or holds
    /// only whitespace.
    pub fn load_query(&self) -> Result<String> {
        let path = &self.config.sql_file;
        let query = fs::read_to_string(path)
            .map_err(|e| FanoutError::QueryFile(format!("Failed to read {path}: {e}")))?;

        if query.trim().is_empty() {
            return Err(FanoutError::QueryFile(format!("{path} is empty")));
        }
        Ok(query)
    }

    /// Report path for a given day
    pub fn report_path(&self, date: NaiveDate) -> String {
        report_path(&self.config.output_dir, &self.host_label, date)
    }

    /// Run `query` against every non-excluded database and write the report
    ///
    /// Per-database failures are logged and skipped. Any existing report for
    /// the same host and day is replaced.
    ///
    /// # Errors
    ///
    /// Returns an error if the databases cannot be listed or the report cannot
    /// be written.
    pub async fn export<S>(&self, source: &mut S, query: &str, date: NaiveDate) -> Result<ExportOutcome>
    where
        S: DatabaseSource + ?Sized,
    {
        let all_databases = source.list_databases().await?;
        let databases: Vec<String> = all_databases
            .into_iter()
            .filter(|name| !self.config.is_excluded(name))
            .collect();

        tracing::info!(
            database_count = databases.len(),
            "Listed databases (system schemas excluded)"
        );

        let report_path = self.report_path(date);
        let path = Path::new(&report_path);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        remove_existing(path)?;

        let mut report = MergedReport::new();
        let mut databases_exported = 0;
        let mut failed_databases = Vec::new();

        for database in &databases {
            tracing::info!(database = %database, "Executing query on database");

            match source.run_query(database, query).await {
                Ok(result) if result.is_empty() => {
                    tracing::info!(database = %database, "No results found");
                }
                Ok(result) => {
                    let rows = report.append(database, result);
                    databases_exported += 1;
                    tracing::info!(database = %database, rows, "Collected rows");
                }
                Err(e) => {
                    tracing::error!(database = %database, error = %e, "Query failed, skipping database");
                    failed_databases.push(database.clone());
                }
            }
        }

        report.write_csv(path)?;

        let outcome = ExportOutcome {
            report_path,
            databases_scanned: databases.len(),
            databases_exported,
            rows_written: report.row_count(),
            failed_databases,
        };

        tracing::info!(
            report_path = %outcome.report_path,
            databases_scanned = outcome.databases_scanned,
            databases_exported = outcome.databases_exported,
            rows_written = outcome.rows_written,
            failed = outcome.failed_databases.len(),
            "Export completed"
        );
        Ok(outcome)
    }
}

fn remove_existing(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "Removed previous report");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
