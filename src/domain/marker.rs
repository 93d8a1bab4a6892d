//! Report marker protocol between the exporter and the orchestrator
//!
//! The exporter announces its result on standard output with two lines:
//!
//! ```text
//! REPORT_PATH:./Output/db01_2024_01_01.csv
//! REPORT_RESULT:{"report_path":"./Output/db01_2024_01_01.csv","databases_scanned":3,...}
//! ```
//!
//! `REPORT_PATH:` is the contract the orchestrator relies on. `REPORT_RESULT:`
//! carries the same path plus counters as a typed [`ExportOutcome`]; it is
//! optional so older exporters that only print the path keep working.

use serde::{Deserialize, Serialize};

/// Prefix of the line carrying the report's relative path
pub const REPORT_PATH_PREFIX: &str = "REPORT_PATH:";

/// Prefix of the line carrying the serialized [`ExportOutcome`]
pub const REPORT_RESULT_PREFIX: &str = "REPORT_RESULT:";

/// Result of one exporter run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOutcome {
    /// Report path, relative to the exporter's working directory
    pub report_path: String,

    /// Databases the query was attempted on (system schemas excluded)
    pub databases_scanned: usize,

    /// Databases that contributed at least one row
    pub databases_exported: usize,

    /// Data rows written, header excluded
    pub rows_written: usize,

    /// Databases whose query failed
    #[serde(default)]
    pub failed_databases: Vec<String>,
}

impl ExportOutcome {
    /// Render the marker lines announcing this outcome
    pub fn marker_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("{REPORT_PATH_PREFIX}{}", self.report_path)];
        // Serializing a struct of strings and integers cannot fail.
        if let Ok(json) = serde_json::to_string(self) {
            lines.push(format!("{REPORT_RESULT_PREFIX}{json}"));
        }
        lines
    }
}

/// Marker found in a host's remote output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportMarker {
    /// Report path as printed by the exporter
    pub relative_path: String,

    /// Typed outcome, when the exporter printed one
    pub outcome: Option<ExportOutcome>,
}

impl ReportMarker {
    /// Scan captured standard output for the report marker
    ///
    /// The first line starting with `REPORT_PATH:` wins; its trimmed remainder
    /// is the path and an empty remainder counts as no marker. When no such
    /// line exists, a parseable `REPORT_RESULT:` line supplies the path.
    pub fn find(stdout: &str) -> Option<Self> {
        let mut path: Option<String> = None;
        let mut outcome: Option<ExportOutcome> = None;

        for line in stdout.lines() {
            if path.is_none() {
                if let Some(rest) = line.strip_prefix(REPORT_PATH_PREFIX) {
                    let rest = rest.trim();
                    if rest.is_empty() {
                        return None;
                    }
                    path = Some(rest.to_string());
                    continue;
                }
            }
            if outcome.is_none() {
                if let Some(rest) = line.strip_prefix(REPORT_RESULT_PREFIX) {
                    match serde_json::from_str::<ExportOutcome>(rest.trim()) {
                        Ok(parsed) => outcome = Some(parsed),
                        Err(e) => {
                            tracing::debug!(error = %e, "Ignoring unparseable REPORT_RESULT line")
                        }
                    }
                }
            }
        }

        let relative_path = match path {
            Some(p) => p,
            None => {
                let from_outcome = outcome.as_ref()?.report_path.trim().to_string();
                if from_outcome.is_empty() {
                    return None;
                }
                from_outcome
            }
        };

        Some(Self {
            relative_path,
            outcome,
        })
    }

    /// Absolute location of the report on the remote host
    ///
    /// A relative path has its leading `./` segments stripped and is appended
    /// to `remote_dir`. Absolute and home-relative (`~/`) paths are used as is.
    pub fn remote_path(&self, remote_dir: &str) -> String {
        let path = self.relative_path.as_str();
        if path.starts_with('/') || path.starts_with("~/") {
            return path.to_string();
        }
        let relative = path.trim_start_matches("./");
        format!("{}/{}", remote_dir.trim_end_matches('/'), relative)
    }
}
