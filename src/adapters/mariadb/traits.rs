//! Database source abstraction
//!
//! The exporter only needs two things from a server: the list of databases
//! and the result of one query against a given database.

use crate::domain::Result;
use async_trait::async_trait;

/// Rows returned by one query, values rendered as text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResult {
    /// Column names from the result set metadata
    pub columns: Vec<String>,

    /// Row values; SQL NULL becomes an empty string
    pub rows: Vec<Vec<String>>,
}

impl QueryResult {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Server the exporter reads from
#[async_trait]
pub trait DatabaseSource: Send {
    /// List every database on the server, in server order
    ///
    /// # Errors
    ///
    /// Returns an error if the listing query fails.
    async fn list_databases(&mut self) -> Result<Vec<String>>;

    /// Make `database` the active database and run `sql` against it
    ///
    /// # Errors
    ///
    /// Returns an error if switching databases or running the query fails.
    /// No partial result is returned in that case.
    async fn run_query(&mut self, database: &str, sql: &str) -> Result<QueryResult>;
}
