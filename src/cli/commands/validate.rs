//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the exporter configuration file.

use super::{EXIT_CONFIG, EXIT_FATAL, EXIT_OK};
use crate::adapters::store::create_stores;
use crate::config::load_config;
use crate::core::settings::ExportSettings;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug, Default)]
pub struct ValidateArgs {
    /// Also open the store and read the export settings
    #[arg(long)]
    pub check_store: bool,
}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(EXIT_CONFIG);
            }
        };

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Dry Run: {}", config.application.dry_run);
        println!("  Store Backend: {:?}", config.effective_backend());
        println!("  Store Path: {}", config.store.path);
        println!("  Output Directory: {}", config.export.output_dir);
        println!("  Filename Prefix: {}", config.export.filename_prefix);
        println!("  Action Token: [REDACTED]");
        println!(
            "  Operator Capabilities: {}",
            config.security.operator_capabilities.join(", ")
        );
        println!("  Local Logging: {}", config.logging.local_enabled);
        println!();

        if !self.check_store {
            return Ok(EXIT_OK);
        }

        let settings = match create_stores(&config).await {
            Ok((_, settings_store)) => ExportSettings::load(settings_store.as_ref()).await,
            Err(e) => Err(e),
        };

        match settings {
            Ok(settings) => {
                println!("✅ Store opened");
                println!(
                    "  Custom Fields: {}",
                    if settings.custom_field_names().is_empty() {
                        "(none)".to_string()
                    } else {
                        settings.custom_field_names().join(", ")
                    }
                );
                println!("  Exported Flag: {:?}", settings.marker_field_name());
                if settings.has_empty_marker() {
                    println!("  ⚠️  Exported flag name is empty; the empty key will be used");
                }
                println!();
                Ok(EXIT_OK)
            }
            Err(e) => {
                println!("❌ Failed to read the store");
                println!("   Error: {e}");
                println!();
                Ok(EXIT_FATAL)
            }
        }
    }
}
