//! MariaDB / MySQL implementation of [`DatabaseSource`]

use super::traits::{DatabaseSource, QueryResult};
use crate::config::DatabaseConfig;
use crate::domain::{DatabaseError, Result};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlRow};
use sqlx::{Column, Connection, Executor, Row, ValueRef};

/// Single connection to the local database server
///
/// Statements are sent as plain `&str` without bind arguments, which makes
/// sqlx use the text protocol: every non-NULL value arrives in its textual
/// form and can be decoded as a string whatever its column type.
pub struct MariaDbSource {
    conn: MySqlConnection,
}

impl MariaDbSource {
    /// Open a connection using the exporter's database settings
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::ConnectionFailed`] if the server is unreachable
    /// or rejects the credentials.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let mut options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user);
        if let Some(ref password) = config.password {
            options = options.password(password.expose_secret().as_ref());
        }

        let conn = MySqlConnection::connect_with(&options).await.map_err(|e| {
            DatabaseError::ConnectionFailed(format!("{}:{}: {}", config.host, config.port, e))
        })?;

        tracing::info!(
            host = %config.host,
            port = config.port,
            user = %config.user,
            "Connected to database server"
        );
        Ok(Self { conn })
    }

    /// Close the connection, logging rather than failing on error
    pub async fn close(self) {
        match self.conn.close().await {
            Ok(()) => tracing::info!("Database connection closed"),
            Err(e) => tracing::warn!(error = %e, "Failed to close database connection cleanly"),
        }
    }
}

#[async_trait]
impl DatabaseSource for MariaDbSource {
    async fn list_databases(&mut self) -> Result<Vec<String>> {
        let rows = (&mut self.conn)
            .fetch_all("SHOW DATABASES")
            .await
            .map_err(|e| DatabaseError::ListFailed(e.to_string()))?;

        let names = rows
            .iter()
            .map(|row| text_value(row, 0))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(names)
    }

    async fn run_query(&mut self, database: &str, sql: &str) -> Result<QueryResult> {
        let use_statement = use_statement(database);
        (&mut self.conn)
            .execute(use_statement.as_str())
            .await
            .map_err(|e| DatabaseError::SwitchFailed {
                database: database.to_string(),
                message: e.to_string(),
            })?;

        let rows = (&mut self.conn)
            .fetch_all(sql)
            .await
            .map_err(|e| DatabaseError::QueryFailed {
                database: database.to_string(),
                message: e.to_string(),
            })?;

        let columns = rows
            .first()
            .map(|row| row.columns().iter().map(|c| c.name().to_string()).collect())
            .unwrap_or_default();

        let mut values = Vec::with_capacity(rows.len());
        for row in &rows {
            let record = (0..row.len())
                .map(|index| text_value(row, index))
                .collect::<std::result::Result<Vec<_>, _>>()?;
            values.push(record);
        }

        Ok(QueryResult {
            columns,
            rows: values,
        })
    }
}

/// `USE` statement with the identifier quoted
fn use_statement(database: &str) -> String {
    format!("USE `{}`", database.replace('`', "``"))
}

/// Decode a column as a CSV field
fn text_value(row: &MySqlRow, index: usize) -> std::result::Result<String, DatabaseError> {
    let decode_err = |e: sqlx::Error| DatabaseError::DecodeFailed {
        index,
        message: e.to_string(),
    };

    if row.try_get_raw(index).map_err(decode_err)?.is_null() {
        return Ok(field_text(None));
    }

    let bytes: &[u8] = row.try_get_unchecked(index).map_err(decode_err)?;
    Ok(field_text(Some(bytes)))
}

/// Text form of a raw value: NULL becomes empty, invalid UTF-8 is replaced
fn field_text(raw: Option<&[u8]>) -> String {
    match raw {
        Some(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        None => String::new(),
    }
}
