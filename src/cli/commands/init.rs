//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use super::{EXIT_CONFIG, EXIT_FATAL, EXIT_OK};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "order-exporter.toml")]
    pub output: String,

    /// Include comments explaining every option
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing order exporter configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Point store.path at your order snapshot");
                println!("  3. Create a .env file with ORDER_EXPORTER_ACTION_TOKEN");
                println!("  4. Validate configuration: order-exporter validate-config");
                println!("  5. Run export: order-exporter export --token <token>");
                println!();
                Ok(EXIT_OK)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(EXIT_FATAL)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Order Exporter Configuration File

[application]
log_level = "info"
dry_run = false

[store]
backend = "json_file"
path = "./orders.json"

[export]
output_dir = "./exports"
filename_prefix = "wc_order_export"

[security]
action_token = "${ORDER_EXPORTER_ACTION_TOKEN}"
operator_capabilities = ["manage_store"]

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# Order Exporter Configuration File
#
# Exports completed orders to CSV and flags them as exported.
# The custom field list and the exported flag name are not set here: they
# are read from the store's options (wc_order_exporter_custom_fields and
# wc_order_exporter_exported_flag).

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# Dry run mode: flags are set in memory only and never written back
dry_run = false

# ============================================================================
# Order Store
# ============================================================================
[store]
# Backend: "json_file" (rewritten after every flag change) or "memory"
backend = "json_file"

# Snapshot file holding "options" and "orders"
path = "./orders.json"

# ============================================================================
# CSV Output
# ============================================================================
[export]
# Directory the CSV file is written into (created if missing)
output_dir = "./exports"

# File name prefix; files are named <prefix>_<YYYY-MM-DD_HH-MM-SS>.csv
filename_prefix = "wc_order_export"

# ============================================================================
# Access Guard
# ============================================================================
[security]
# Token every export/unset request must present (use an environment variable)
action_token = "${ORDER_EXPORTER_ACTION_TOKEN}"

# Capabilities of the operator running the CLI; manage_store is required
operator_capabilities = ["manage_store"]

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Enable local JSON file logging
local_enabled = false

# Local log directory
local_path = "./logs"

# Log rotation (daily, hourly or never)
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExporterConfig;
    use tempfile::TempDir;

    #[test]
    fn test_generate_minimal_config() {
        let config = InitArgs::generate_minimal_config();
        assert!(config.contains("[application]"));
        assert!(config.contains("[store]"));
        assert!(config.contains("[security]"));
    }

    #[test]
    fn test_generated_configs_parse() {
        for content in [
            InitArgs::generate_minimal_config(),
            InitArgs::generate_config_with_examples(),
        ] {
            let config: ExporterConfig = toml::from_str(&content).unwrap();
            assert_eq!(config.store.path, "./orders.json");
            assert_eq!(config.export.filename_prefix, "wc_order_export");
        }
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("order-exporter.toml");
        fs::write(&output, "existing").unwrap();

        let args = InitArgs {
            output: output.to_string_lossy().to_string(),
            with_examples: false,
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), EXIT_CONFIG);
        assert_eq!(fs::read_to_string(&output).unwrap(), "existing");

        let args = InitArgs { force: true, ..args };
        assert_eq!(args.execute().await.unwrap(), EXIT_OK);
        assert!(fs::read_to_string(&output).unwrap().contains("[store]"));
    }
}
