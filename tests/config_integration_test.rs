//! Integration tests for configuration loading and validation
//!
//! Tests that modify environment variables hold ENV_MUTEX so they do not
//! interfere with each other.

use dbfanout::config::load_config;
use dbfanout::domain::FanoutError;
use secrecy::ExposeSecret;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("DBFANOUT_APPLICATION_LOG_LEVEL");
    std::env::remove_var("DBFANOUT_APPLICATION_DRY_RUN");
    std::env::remove_var("DBFANOUT_SERVERS_JSON");
    std::env::remove_var("DBFANOUT_REMOTE_SCRIPT_DIR");
    std::env::remove_var("DBFANOUT_RETRIEVAL_LOCAL_DIR");
    std::env::remove_var("DBFANOUT_EXPORTER_SQL_FILE");
    std::env::remove_var("DBFANOUT_DATABASE_PORT");
    std::env::remove_var("DBFANOUT_DATABASE_PASSWORD");
    std::env::remove_var("DBFANOUT_LOGGING_FILE_PATH");
    std::env::remove_var("DBFANOUT_LOGGING_FILE_ENABLED");
    std::env::remove_var("TEST_DB_PASSWORD");
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(contents.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

const COMPLETE_CONFIG: &str = r#"
[application]
log_level = "debug"
dry_run = true

[[servers]]
label = "db01"
ssh_host = "10.0.0.5"
ssh_user = "deploy"
ssh_key = "~/.ssh/id_ed25519"

[[servers]]
label = "db02"
ssh_host = "db02.internal"
ssh_user = "deploy"
ssh_key = "/etc/dbfanout/id_rsa"

[remote]
script_dir = "/srv/dbfanout"
branch = "size"
setup_commands = ["cargo build --release --quiet"]
exporter_command = "./target/release/dbfanout export"
ssh_options = ["-o", "BatchMode=yes"]

[retrieval]
local_dir = "/tmp/RetrievedReports"

[exporter]
sql_file = "query.sql"
output_dir = "./Output"
host_label = "db01"
exclude_databases = ["scratch"]

[exporter.database]
host = "127.0.0.1"
port = 3307
user = "report"
password = "plain-pass"

[logging]
file_enabled = false
file_path = "orchestration.log"
format = "json"
"#;

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let temp_file = write_config(COMPLETE_CONFIG);
    let config = load_config(temp_file.path()).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert!(config.application.dry_run);

    let labels: Vec<&str> = config.servers.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["db01", "db02"]);
    assert_eq!(config.servers[1].destination(), "deploy@db02.internal");

    assert_eq!(config.remote.script_dir, "/srv/dbfanout");
    assert_eq!(config.remote.branch, "size");
    assert_eq!(config.remote.ssh_options, vec!["-o", "BatchMode=yes"]);
    assert_eq!(config.retrieval.local_dir, "/tmp/RetrievedReports");

    let exporter = config.exporter.as_ref().unwrap();
    assert_eq!(exporter.host_label.as_deref(), Some("db01"));
    assert!(exporter.is_excluded("scratch"));
    assert!(exporter.is_excluded("mysql"));
    assert!(!exporter.is_excluded("shop"));
    assert_eq!(exporter.database.port, 3307);
    assert_eq!(
        exporter
            .database
            .password
            .as_ref()
            .unwrap()
            .expose_secret()
            .as_ref(),
        "plain-pass"
    );

    assert!(!config.logging.file_enabled);
    assert_eq!(config.logging.format, "json");
}

#[test]
fn test_defaults_for_minimal_config() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[[servers]]
label = "db01"
ssh_host = "10.0.0.5"
ssh_user = "deploy"
ssh_key = "/keys/id"
"#,
    );
    let config = load_config(temp_file.path()).unwrap();

    assert_eq!(config.application.log_level, "info");
    assert!(!config.application.dry_run);
    assert_eq!(config.remote.script_dir, "~/run_query");
    assert_eq!(config.retrieval.local_dir, "./RetrievedReports");
    assert!(config.logging.file_enabled);
    assert_eq!(config.logging.file_path, "orchestration.log");
    assert!(config.exporter.is_none());
}

#[test]
fn test_servers_json_replaces_file_servers() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    std::env::set_var(
        "DBFANOUT_SERVERS_JSON",
        r#"[
            {"label":"a","ssh_host":"10.0.0.1","ssh_user":"u","ssh_key":"/k"},
            {"label":"b","ssh_host":"10.0.0.2","ssh_user":"u","ssh_key":"/k"},
            {"label":"c","ssh_host":"10.0.0.3","ssh_user":"u","ssh_key":"/k"}
        ]"#,
    );

    let temp_file = write_config(COMPLETE_CONFIG);
    let result = load_config(temp_file.path());
    cleanup_env_vars();

    let config = result.unwrap();
    let labels: Vec<&str> = config.servers.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["a", "b", "c"]);
}

#[test]
fn test_invalid_servers_json_is_configuration_error() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    std::env::set_var("DBFANOUT_SERVERS_JSON", "not json");

    let temp_file = write_config(COMPLETE_CONFIG);
    let result = load_config(temp_file.path());
    cleanup_env_vars();

    let err = result.unwrap_err();
    assert!(matches!(err, FanoutError::Configuration(_)));
    assert!(err.to_string().contains("DBFANOUT_SERVERS_JSON"));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_env_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    std::env::set_var("DBFANOUT_APPLICATION_LOG_LEVEL", "warn");
    std::env::set_var("DBFANOUT_REMOTE_SCRIPT_DIR", "/opt/run_query");
    std::env::set_var("DBFANOUT_RETRIEVAL_LOCAL_DIR", "/data/reports");
    std::env::set_var("DBFANOUT_EXPORTER_SQL_FILE", "/etc/dbfanout/query.sql");
    std::env::set_var("DBFANOUT_DATABASE_PORT", "3310");
    std::env::set_var("DBFANOUT_DATABASE_PASSWORD", "from-env");
    std::env::set_var("DBFANOUT_LOGGING_FILE_PATH", "/var/log/dbfanout.log");

    let temp_file = write_config(COMPLETE_CONFIG);
    let result = load_config(temp_file.path());
    cleanup_env_vars();

    let config = result.unwrap();
    assert_eq!(config.application.log_level, "warn");
    assert_eq!(config.remote.script_dir, "/opt/run_query");
    assert_eq!(config.retrieval.local_dir, "/data/reports");
    assert_eq!(config.logging.file_path, "/var/log/dbfanout.log");

    let exporter = config.exporter.unwrap();
    assert_eq!(exporter.sql_file, "/etc/dbfanout/query.sql");
    assert_eq!(exporter.database.port, 3310);
    assert_eq!(
        exporter.database.password.unwrap().expose_secret().as_ref(),
        "from-env"
    );
}

#[test]
fn test_invalid_port_override() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    std::env::set_var("DBFANOUT_DATABASE_PORT", "not-a-port");

    let temp_file = write_config(COMPLETE_CONFIG);
    let result = load_config(temp_file.path());
    cleanup_env_vars();

    assert!(matches!(result, Err(FanoutError::Configuration(_))));
}

#[test]
fn test_invalid_dry_run_override() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    std::env::set_var("DBFANOUT_APPLICATION_DRY_RUN", "yes");

    let temp_file = write_config(COMPLETE_CONFIG);
    let result = load_config(temp_file.path());
    cleanup_env_vars();

    let err = result.unwrap_err();
    assert!(matches!(err, FanoutError::Configuration(_)));
    assert!(err.to_string().contains("DBFANOUT_APPLICATION_DRY_RUN"));
}

#[test]
fn test_bool_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    std::env::set_var("DBFANOUT_APPLICATION_DRY_RUN", "false");
    std::env::set_var("DBFANOUT_LOGGING_FILE_ENABLED", "TRUE");

    let temp_file = write_config(COMPLETE_CONFIG);
    let result = load_config(temp_file.path());
    cleanup_env_vars();

    let config = result.unwrap();
    assert!(!config.application.dry_run);
    assert!(config.logging.file_enabled);
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    std::env::set_var("TEST_DB_PASSWORD", "substituted");
    let contents = COMPLETE_CONFIG.replace("plain-pass", "${TEST_DB_PASSWORD}");

    let temp_file = write_config(&contents);
    let result = load_config(temp_file.path());
    cleanup_env_vars();

    let exporter = result.unwrap().exporter.unwrap();
    assert_eq!(
        exporter.database.password.unwrap().expose_secret().as_ref(),
        "substituted"
    );
}

#[test]
fn test_missing_substitution_variable() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let contents = COMPLETE_CONFIG.replace("plain-pass", "${TEST_DB_PASSWORD}");
    let temp_file = write_config(&contents);

    let err = load_config(temp_file.path()).unwrap_err();
    assert!(err.to_string().contains("TEST_DB_PASSWORD"));
}

#[test]
fn test_duplicate_server_labels_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[[servers]]
label = "db01"
ssh_host = "10.0.0.5"
ssh_user = "deploy"
ssh_key = "/keys/id"

[[servers]]
label = "db01"
ssh_host = "10.0.0.6"
ssh_user = "deploy"
ssh_key = "/keys/id"
"#,
    );

    let err = load_config(temp_file.path()).unwrap_err();
    assert!(err.to_string().contains("Duplicate server label"));
}

#[test]
fn test_select_servers() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let temp_file = write_config(COMPLETE_CONFIG);
    let config = load_config(temp_file.path()).unwrap();

    let selected = config
        .select_servers(&["db02".to_string(), "db01".to_string()])
        .unwrap();
    let labels: Vec<&str> = selected.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["db01", "db02"]);

    assert!(config.select_servers(&["db09".to_string()]).is_err());
}
