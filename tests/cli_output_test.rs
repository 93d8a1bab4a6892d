//! Tests that run the built binary and check which stream its output uses
//!
//! The orchestrator reads the export command's stdout for marker lines, so
//! log output must stay on stderr.

use std::process::{Command, Output};
use tempfile::TempDir;

fn run_export(dir: &TempDir) -> Output {
    let config_path = dir.path().join("dbfanout.toml");
    let missing_sql = dir.path().join("missing.sql");
    std::fs::write(
        &config_path,
        format!(
            r#"
[exporter]
sql_file = "{}"
output_dir = "./Output"

[exporter.database]
user = "report"

[logging]
file_enabled = false
"#,
            missing_sql.display()
        ),
    )
    .unwrap();

    let mut command = Command::new(env!("CARGO_BIN_EXE_dbfanout"));
    command
        .arg("--config")
        .arg(&config_path)
        .arg("export")
        .current_dir(dir.path())
        .env_remove("RUST_LOG");
    for (key, _) in std::env::vars() {
        if key.starts_with("DBFANOUT_") {
            command.env_remove(key);
        }
    }
    command.output().unwrap()
}

#[test]
fn test_export_logs_stay_off_stdout() {
    let dir = TempDir::new().unwrap();
    let output = run_export(&dir);

    assert_eq!(output.status.code(), Some(2));
    assert!(
        output.stdout.is_empty(),
        "unexpected stdout: {}",
        String::from_utf8_lossy(&output.stdout)
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Starting export command"));
    assert!(stderr.contains("Failed to load SQL query"));
}

#[test]
fn test_console_logs_plain_when_not_a_terminal() {
    let dir = TempDir::new().unwrap();
    let output = run_export(&dir);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Logging initialized"));
    assert!(!stderr.contains("\x1b["), "ANSI escape in stderr: {stderr:?}");
}
