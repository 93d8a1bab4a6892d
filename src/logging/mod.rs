//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output
//! - An append-only log file (text or JSON lines) kept open for the process lifetime
//! - Configurable log levels
//!
//! # Example
//!
//! ```no_run
//! use dbfanout::logging::init_logging;
//! use dbfanout::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(host = "db01", "Connecting");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Trimmed text, or `None` when there is nothing to show
pub fn or_none(text: &str) -> &str {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        "None"
    } else {
        trimmed
    }
}

/// Log the start of work on a host
///
/// # Example
///
/// ```no_run
/// use dbfanout::log_host_start;
///
/// log_host_start!("db01", "deploy@10.0.0.5");
/// ```
#[macro_export]
macro_rules! log_host_start {
    ($label:expr, $destination:expr) => {
        tracing::info!(
            host = %$label,
            destination = %$destination,
            "Connecting"
        );
    };
}

/// Log a failed ssh/scp invocation with its exit code and captured output
///
/// # Example
///
/// ```no_run
/// use dbfanout::log_process_failure;
/// use dbfanout::adapters::remote::CommandOutput;
///
/// let output = CommandOutput { status: Some(255), stdout: String::new(), stderr: "Connection refused".into() };
/// log_process_failure!("db01", "Remote command", &output);
/// ```
#[macro_export]
macro_rules! log_process_failure {
    ($label:expr, $process:expr, $output:expr) => {
        tracing::error!(
            host = %$label,
            code = %$output.status_label(),
            "{} failed",
            $process
        );
        tracing::error!(host = %$label, "Stdout:\n{}", $crate::logging::or_none(&$output.stdout));
        tracing::error!(host = %$label, "Stderr:\n{}", $crate::logging::or_none(&$output.stderr));
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use dbfanout::log_error_with_context;
/// use dbfanout::domain::FanoutError;
///
/// let error = FanoutError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
