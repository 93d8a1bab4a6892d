//! Database export run on each host
//!
//! - Report naming from host and date
//! - Merging per-database results into one CSV
//! - The exporter run itself

pub mod exporter;
pub mod naming;
pub mod report;

pub use exporter::RemoteExporter;
pub use naming::{report_file_name, report_path, sanitize_host};
pub use report::{MergedReport, DATABASE_COLUMN};
