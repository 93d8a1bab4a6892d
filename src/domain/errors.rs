//! Domain error types
//!
//! This module defines the error hierarchy for dbfanout.
//! Errors from third-party crates (sqlx, csv, process spawning) are mapped
//! into these types at the adapter boundary.

use thiserror::Error;

/// Main dbfanout error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum FanoutError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// SSH / SCP errors
    #[error("Remote error: {0}")]
    Remote(#[from] RemoteError),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// The SQL query file could not be used
    #[error("Query file error: {0}")]
    QueryFile(String),

    /// CSV report errors
    #[error("Report error: {0}")]
    Report(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Errors raised while talking to a host over SSH or SCP
///
/// A non-zero exit status is not an error at this level; callers inspect
/// [`crate::adapters::remote::CommandOutput`] for that.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The ssh or scp executable was not found
    #[error("{program} not found. Is OpenSSH installed?")]
    BinaryMissing { program: String },

    /// The process could not be started
    #[error("Failed to spawn {program}: {message}")]
    SpawnFailed { program: String, message: String },

    /// The SSH key path could not be resolved
    #[error("Invalid SSH key path: {0}")]
    InvalidKeyPath(String),
}

/// Database-specific errors
///
/// These errors don't expose sqlx types.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to connect to the database server
    #[error("Failed to connect to database server: {0}")]
    ConnectionFailed(String),

    /// Failed to list databases
    #[error("Failed to list databases: {0}")]
    ListFailed(String),

    /// Failed to switch the active database
    #[error("Failed to switch to database '{database}': {message}")]
    SwitchFailed { database: String, message: String },

    /// The query failed on a database
    #[error("Query failed on database '{database}': {message}")]
    QueryFailed { database: String, message: String },

    /// A column value could not be decoded
    #[error("Failed to decode column {index}: {message}")]
    DecodeFailed { index: usize, message: String },
}

impl FanoutError {
    /// Exit code the CLI reports for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            FanoutError::Configuration(_) | FanoutError::QueryFile(_) => 2,
            FanoutError::Database(DatabaseError::ConnectionFailed(_)) => 4,
            _ => 5,
        }
    }
}

impl From<std::io::Error> for FanoutError {
    fn from(err: std::io::Error) -> Self {
        FanoutError::Io(err.to_string())
    }
}

impl From<csv::Error> for FanoutError {
    fn from(err: csv::Error) -> Self {
        FanoutError::Report(err.to_string())
    }
}

impl From<serde_json::Error> for FanoutError {
    fn from(err: serde_json::Error) -> Self {
        FanoutError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for FanoutError {
    fn from(err: toml::de::Error) -> Self {
        FanoutError::Configuration(format!("Failed to parse TOML: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_conversion() {
        let err: FanoutError = RemoteError::BinaryMissing {
            program: "ssh".to_string(),
        }
        .into();
        assert!(matches!(err, FanoutError::Remote(_)));
        assert!(err.to_string().contains("ssh not found"));
    }

    #[test]
    fn test_database_error_display() {
        let err = DatabaseError::QueryFailed {
            database: "shop".to_string(),
            message: "Table 'shop.orders' doesn't exist".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Query failed on database 'shop': Table 'shop.orders' doesn't exist"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: FanoutError = io_err.into();
        assert!(matches!(err, FanoutError::Io(_)));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(FanoutError::Configuration("x".into()).exit_code(), 2);
        assert_eq!(FanoutError::QueryFile("x".into()).exit_code(), 2);
        assert_eq!(
            FanoutError::Database(DatabaseError::ConnectionFailed("refused".into())).exit_code(),
            4
        );
        assert_eq!(FanoutError::Report("x".into()).exit_code(), 5);
    }
}
