//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{FanoutConfig, ServerConfig};
use super::secret_string_opt;
use crate::domain::errors::FanoutError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Environment variable holding the server list as a JSON array
pub const SERVERS_JSON_VAR: &str = "DBFANOUT_SERVERS_JSON";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into FanoutConfig
/// 4. Applies environment variable overrides (DBFANOUT_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`FanoutError::Configuration`] if the file is missing or unreadable,
/// a referenced variable is unset, the TOML or `DBFANOUT_SERVERS_JSON` does not
/// parse, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use dbfanout::config::loader::load_config;
///
/// let config = load_config("dbfanout.toml").expect("Failed to load config");
/// println!("{} servers", config.servers.len());
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<FanoutConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(FanoutError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        FanoutError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses configuration text, applying substitution, overrides and validation
pub fn parse_config(contents: &str) -> Result<FanoutConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: FanoutConfig = toml::from_str(&contents)?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        FanoutError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| FanoutError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(FanoutError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Parses a JSON array of servers
///
/// ```
/// use dbfanout::config::loader::parse_servers_json;
///
/// let servers = parse_servers_json(
///     r#"[{"label":"db01","ssh_host":"10.0.0.5","ssh_user":"deploy","ssh_key":"~/.ssh/id_ed25519"}]"#,
/// ).unwrap();
/// assert_eq!(servers[0].label, "db01");
/// ```
pub fn parse_servers_json(raw: &str) -> Result<Vec<ServerConfig>> {
    serde_json::from_str(raw).map_err(|e| {
        FanoutError::Configuration(format!("Failed to parse {SERVERS_JSON_VAR}: {e}"))
    })
}

/// Parses a boolean override (`true` or `false`, any case)
fn parse_bool_override(name: &str, val: &str) -> Result<bool> {
    match val.trim().to_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(FanoutError::Configuration(format!(
            "Invalid {name} '{val}': expected true or false"
        ))),
    }
}

/// Applies environment variable overrides using the DBFANOUT_* prefix
///
/// Environment variables follow the pattern: DBFANOUT_<SECTION>_<KEY>.
/// Database overrides apply only when an `[exporter]` section is present.
fn apply_env_overrides(config: &mut FanoutConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("DBFANOUT_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("DBFANOUT_APPLICATION_DRY_RUN") {
        config.application.dry_run = parse_bool_override("DBFANOUT_APPLICATION_DRY_RUN", &val)?;
    }

    // Server list
    if let Ok(val) = std::env::var(SERVERS_JSON_VAR) {
        config.servers = parse_servers_json(&val)?;
    }

    // Remote overrides
    if let Ok(val) = std::env::var("DBFANOUT_REMOTE_SCRIPT_DIR") {
        config.remote.script_dir = val;
    }
    if let Ok(val) = std::env::var("DBFANOUT_REMOTE_BRANCH") {
        config.remote.branch = val;
    }
    if let Ok(val) = std::env::var("DBFANOUT_REMOTE_EXPORTER_COMMAND") {
        config.remote.exporter_command = val;
    }

    // Retrieval overrides
    if let Ok(val) = std::env::var("DBFANOUT_RETRIEVAL_LOCAL_DIR") {
        config.retrieval.local_dir = val;
    }

    // Exporter overrides
    if let Some(ref mut exporter) = config.exporter {
        if let Ok(val) = std::env::var("DBFANOUT_EXPORTER_SQL_FILE") {
            exporter.sql_file = val;
        }
        if let Ok(val) = std::env::var("DBFANOUT_EXPORTER_OUTPUT_DIR") {
            exporter.output_dir = val;
        }
        if let Ok(val) = std::env::var("DBFANOUT_EXPORTER_HOST_LABEL") {
            exporter.host_label = Some(val);
        }
        if let Ok(val) = std::env::var("DBFANOUT_DATABASE_HOST") {
            exporter.database.host = val;
        }
        if let Ok(val) = std::env::var("DBFANOUT_DATABASE_PORT") {
            exporter.database.port = val.parse().map_err(|e| {
                FanoutError::Configuration(format!("Invalid DBFANOUT_DATABASE_PORT '{val}': {e}"))
            })?;
        }
        if let Ok(val) = std::env::var("DBFANOUT_DATABASE_USER") {
            exporter.database.user = val;
        }
        if let Ok(val) = std::env::var("DBFANOUT_DATABASE_PASSWORD") {
            exporter.database.password = secret_string_opt(Some(val));
        }
    }

    // Logging overrides
    if let Ok(val) = std::env::var("DBFANOUT_LOGGING_FILE_ENABLED") {
        config.logging.file_enabled = parse_bool_override("DBFANOUT_LOGGING_FILE_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("DBFANOUT_LOGGING_FILE_PATH") {
        config.logging.file_path = val;
    }
    if let Ok(val) = std::env::var("DBFANOUT_LOGGING_FORMAT") {
        config.logging.format = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("DBFANOUT_LOADER_TEST_VAR", "test_value");
        let input = "password = \"${DBFANOUT_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "password = \"test_value\"\n");
        std::env::remove_var("DBFANOUT_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("DBFANOUT_LOADER_MISSING_VAR");
        let input = "password = \"${DBFANOUT_LOADER_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("DBFANOUT_LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_skips_comments() {
        let input = "# password = \"${DBFANOUT_LOADER_COMMENTED_VAR}\"";
        assert!(substitute_env_vars(input).is_ok());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(matches!(result, Err(FanoutError::Configuration(_))));
    }

    #[test]
    fn test_parse_servers_json_invalid() {
        let err = parse_servers_json("[{\"label\": \"db01\"").unwrap_err();
        assert!(err.to_string().contains(SERVERS_JSON_VAR));
    }

    #[test]
    fn test_parse_servers_json_missing_field() {
        assert!(parse_servers_json(r#"[{"label":"db01","ssh_host":"h"}]"#).is_err());
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[[servers]]
label = "db01"
ssh_host = "10.0.0.5"
ssh_user = "deploy"
ssh_key = "~/.ssh/id_ed25519"

[remote]
script_dir = "/srv/dbfanout"
branch = "reports"

[retrieval]
local_dir = "./RetrievedReports"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.servers.len(), 1);
        assert_eq!(config.servers[0].destination(), "deploy@10.0.0.5");
        assert_eq!(config.remote.script_dir, "/srv/dbfanout");
        assert_eq!(config.remote.branch, "reports");
        assert!(config.exporter.is_none());
    }

    #[test]
    fn test_parse_bool_override() {
        assert!(parse_bool_override("DBFANOUT_APPLICATION_DRY_RUN", "true").unwrap());
        assert!(parse_bool_override("DBFANOUT_APPLICATION_DRY_RUN", " FALSE ").map(|b| !b).unwrap());
        let err = parse_bool_override("DBFANOUT_APPLICATION_DRY_RUN", "yes").unwrap_err();
        assert!(matches!(err, FanoutError::Configuration(_)));
        assert!(err.to_string().contains("DBFANOUT_APPLICATION_DRY_RUN"));
    }

    #[test]
    fn test_parse_config_rejects_unknown_types() {
        let result = parse_config("servers = \"not a list\"");
        assert!(matches!(result, Err(FanoutError::Configuration(_))));
    }
}
