//! Report file naming

use crate::config::ExporterConfig;
use chrono::NaiveDate;

/// Replace every character outside `[A-Za-z0-9_-]` with `_`
pub fn sanitize_host(host: &str) -> String {
    host.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// `<host>_<YYYY_MM_DD>.csv`
pub fn report_file_name(host: &str, date: NaiveDate) -> String {
    format!("{}_{}.csv", sanitize_host(host), date.format("%Y_%m_%d"))
}

/// Report path as announced in the marker line, e.g. `./Output/db01_2024_01_01.csv`
///
/// An empty `output_dir` means the working directory.
pub fn report_path(output_dir: &str, host: &str, date: NaiveDate) -> String {
    let file_name = report_file_name(host, date);
    let dir = output_dir.trim();
    if dir.is_empty() {
        return file_name;
    }
    match dir.trim_end_matches('/') {
        "" => format!("/{file_name}"),
        trimmed => format!("{trimmed}/{file_name}"),
    }
}

/// Host identifier for the report name
///
/// Uses `exporter.host_label` when set, else the machine hostname, else the
/// database host.
pub fn resolve_host_label(config: &ExporterConfig) -> String {
    if let Some(ref label) = config.host_label {
        return label.clone();
    }

    match hostname::get() {
        Ok(name) if !name.is_empty() => name.to_string_lossy().into_owned(),
        Ok(_) => config.database.host.clone(),
        Err(e) => {
            tracing::warn!(error = %e, "Could not read hostname, using database host");
            config.database.host.clone()
        }
    }
}
