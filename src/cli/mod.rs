//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for dbfanout using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// dbfanout - run one SQL query on every database of every host
#[derive(Parser, Debug)]
#[command(name = "dbfanout")]
#[command(version, about, long_about = None)]
#[command(author = "dbfanout Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "dbfanout.toml", env = "DBFANOUT_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "DBFANOUT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Whether the command needs a loaded configuration file
    pub fn needs_config(&self) -> bool {
        matches!(self.command, Commands::Orchestrate(_) | Commands::Export(_))
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the exporter on every configured server and fetch the reports
    Orchestrate(commands::orchestrate::OrchestrateArgs),

    /// Export query results from every database on this host to one CSV
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_orchestrate() {
        let cli = Cli::parse_from(["dbfanout", "orchestrate"]);
        assert_eq!(cli.config, "dbfanout.toml");
        assert!(matches!(cli.command, Commands::Orchestrate(_)));
        assert!(cli.needs_config());
    }

    #[test]
    fn test_cli_parse_orchestrate_flags() {
        let cli = Cli::parse_from([
            "dbfanout",
            "orchestrate",
            "--dry-run",
            "--server",
            "db01,db02",
        ]);
        match cli.command {
            Commands::Orchestrate(args) => {
                assert!(args.dry_run);
                assert_eq!(args.server_labels(), vec!["db01", "db02"]);
            }
            _ => panic!("expected orchestrate"),
        }
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["dbfanout", "--config", "custom.toml", "export"]);
        assert_eq!(cli.config, "custom.toml");
        assert!(matches!(cli.command, Commands::Export(_)));
    }

    #[test]
    fn test_cli_parse_export_overrides() {
        let cli = Cli::parse_from([
            "dbfanout",
            "export",
            "--sql-file",
            "query.sql",
            "--output-dir",
            "/tmp/out",
        ]);
        match cli.command {
            Commands::Export(args) => {
                assert_eq!(args.sql_file.as_deref(), Some("query.sql"));
                assert_eq!(args.output_dir.as_deref(), Some("/tmp/out"));
            }
            _ => panic!("expected export"),
        }
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["dbfanout", "--log-level", "debug", "orchestrate"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["dbfanout", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
        assert!(!cli.needs_config());
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["dbfanout", "init", "--force"]);
        match cli.command {
            Commands::Init(args) => {
                assert!(args.force);
                assert_eq!(args.output, "dbfanout.toml");
            }
            _ => panic!("expected init"),
        }
    }
}
