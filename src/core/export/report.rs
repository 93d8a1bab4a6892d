//! Merged CSV report
//!
//! Rows from every database are collected in memory and written in one go,
//! each prefixed with the name of the database it came from.

use crate::adapters::mariadb::QueryResult;
use crate::domain::Result;
use std::path::Path;

/// Name of the first header column
pub const DATABASE_COLUMN: &str = "Database";

/// All rows of one exporter run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedReport {
    header: Option<Vec<String>>,
    rows: Vec<Vec<String>>,
}

impl MergedReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the rows one database returned; returns how many were added
    ///
    /// The header is taken from the first non-empty result only. Later results
    /// are appended under that header even if their columns differ.
    pub fn append(&mut self, database: &str, result: QueryResult) -> usize {
        if result.rows.is_empty() {
            return 0;
        }

        if self.header.is_none() {
            let mut header = Vec::with_capacity(result.columns.len() + 1);
            header.push(DATABASE_COLUMN.to_string());
            header.extend(result.columns);
            self.header = Some(header);
        }

        let added = result.rows.len();
        self.rows.extend(result.rows.into_iter().map(|values| {
            let mut row = Vec::with_capacity(values.len() + 1);
            row.push(database.to_string());
            row.extend(values);
            row
        }));
        added
    }

    pub fn header(&self) -> Option<&[String]> {
        self.header.as_deref()
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Data rows, header excluded
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Write the report, replacing any file at `path`
    ///
    /// An empty report produces an empty file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        // Rows may be wider or narrower than the header when schemas differ
        let mut writer = csv::WriterBuilder::new().flexible(true).from_path(path)?;

        if let Some(ref header) = self.header {
            writer.write_record(header)?;
        }
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}
