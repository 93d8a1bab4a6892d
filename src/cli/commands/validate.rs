//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the dbfanout configuration file.

use crate::config::load_config;
use crate::domain::RemoteCommandSequence;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config also validates
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Dry Run: {}", config.application.dry_run);
        println!("  Servers: {}", config.servers.len());
        for server in &config.servers {
            println!("    - {} ({})", server.label, server.destination());
        }
        println!("  Remote Directory: {}", config.remote.script_dir);
        println!(
            "  Remote Command: {}",
            RemoteCommandSequence::from_config(&config.remote).joined()
        );
        println!("  Retrieval Directory: {}", config.retrieval.local_dir);

        match config.exporter {
            Some(ref exporter) => {
                println!("  Exporter SQL File: {}", exporter.sql_file);
                println!("  Exporter Output Directory: {}", exporter.output_dir);
                println!(
                    "  Exporter Database: {}@{}:{}",
                    exporter.database.user, exporter.database.host, exporter.database.port
                );
                if !exporter.exclude_databases.is_empty() {
                    println!("  Excluded Databases: {:?}", exporter.exclude_databases);
                }
            }
            None => println!("  Exporter: not configured"),
        }

        if config.logging.file_enabled {
            println!(
                "  Log File: {} ({})",
                config.logging.file_path, config.logging.format
            );
        } else {
            println!("  Log File: disabled");
        }
        println!();
        Ok(0)
    }
}
