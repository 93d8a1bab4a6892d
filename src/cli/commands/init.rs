//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "dbfanout.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing dbfanout configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your servers and database user", self.output);
                println!("  2. Put the SQL query in the file named by exporter.sql_file");
                println!("  3. Set DBFANOUT_DATABASE_PASSWORD in .env on each database host");
                println!("  4. Validate configuration: dbfanout validate-config");
                println!("  5. Run: dbfanout orchestrate");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5)
            }
        }
    }

    /// Sample configuration covering every section
    pub fn generate_config() -> String {
        r#"# dbfanout configuration
# Runs one SQL query on every database of every host and collects the CSVs.

[application]
log_level = "info"
dry_run = false

# Hosts, processed in order. Can also be supplied as a JSON array
# in DBFANOUT_SERVERS_JSON.
[[servers]]
label = "db01"
ssh_host = "10.0.0.5"
ssh_user = "deploy"
ssh_key = "~/.ssh/id_ed25519"

[remote]
# Checkout of dbfanout on each host
script_dir = "~/run_query"
branch = "main"
setup_commands = ["cargo build --release --quiet"]
exporter_command = "./target/release/dbfanout export"
ssh_options = ["-o", "BatchMode=yes"]

[retrieval]
local_dir = "./RetrievedReports"

# Read by `dbfanout export` on each host
[exporter]
sql_file = "query.sql"
output_dir = "./Output"
exclude_databases = []

[exporter.database]
host = "localhost"
port = 3306
user = "report"
password = "${DBFANOUT_DATABASE_PASSWORD}"

[logging]
file_enabled = true
file_path = "orchestration.log"
format = "text"
"#
        .to_string()
    }
}
