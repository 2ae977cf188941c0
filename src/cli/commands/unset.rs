//! Unset command implementation
//!
//! Clears the exported flag on every completed order so the next export
//! includes them again.

use super::{access_request, exit_code_for, EXIT_CONFIG, EXIT_OK};
use crate::config::load_config;
use crate::core::access::AdminAction;
use crate::core::coordinator::ActionCoordinator;
use clap::Args;

/// Arguments for the unset command
#[derive(Args, Debug, Default)]
pub struct UnsetArgs {
    /// Anti-forgery token for the unset action
    #[arg(long, env = "ORDER_EXPORTER_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Dry run mode - clear flags in memory only
    #[arg(long)]
    pub dry_run: bool,
}

impl UnsetArgs {
    /// Execute the unset command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting unset command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
            eprintln!("🔍 DRY RUN MODE - Flags are cleared in memory only");
        }

        let coordinator = match ActionCoordinator::from_config(&config) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Invalid security configuration");
                eprintln!("Failed to initialize unset: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        let request = access_request(self.token.as_deref(), &config);
        if let Err(e) = coordinator.authorize(AdminAction::UnsetExportedFlag, &request) {
            eprintln!("Unset failed: {e}");
            return Ok(exit_code_for(&e));
        }

        if !self.yes && !config.application.dry_run {
            eprintln!("This removes the exported flag from every completed order.");
            eprintln!("  Store: {}", config.store.path);
            eprint!("Proceed? [y/N]: ");
            use std::io::{self, Write};
            io::stderr().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;

            if !input.trim().eq_ignore_ascii_case("y") {
                eprintln!("Unset cancelled.");
                return Ok(EXIT_OK);
            }
        }

        let outcome = match coordinator.unset_exported_flag(&request).await {
            Ok(o) => o,
            Err(e) => {
                tracing::error!(error = %e, "Unset failed");
                eprintln!("Unset failed: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        eprintln!("✅ Exported flag cleared on {} orders", outcome.cleared_count());
        Ok(EXIT_OK)
    }
}
