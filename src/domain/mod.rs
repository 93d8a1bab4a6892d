//! Domain types for dbfanout.
//!
//! - **Error types** ([`FanoutError`], [`RemoteError`], [`DatabaseError`])
//! - **Result type alias** ([`Result`])
//! - **Remote command sequence** ([`RemoteCommandSequence`])
//! - **Report marker protocol** ([`ReportMarker`], [`ExportOutcome`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, FanoutError>`]:
//!
//! ```rust
//! use dbfanout::domain::Result;
//!
//! fn example() -> Result<()> {
//!     let config = dbfanout::config::load_config("dbfanout.toml")?;
//!     println!("{} servers", config.servers.len());
//!     Ok(())
//! }
//! ```

pub mod command;
pub mod errors;
pub mod marker;
pub mod result;

// Re-export commonly used types for convenience
pub use command::RemoteCommandSequence;
pub use errors::{DatabaseError, FanoutError, RemoteError};
pub use marker::{ExportOutcome, ReportMarker, REPORT_PATH_PREFIX, REPORT_RESULT_PREFIX};
pub use result::Result;
