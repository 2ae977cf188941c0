//! Status command implementation
//!
//! This module implements the `status` command: list completed orders and
//! whether each one is flagged as exported.

use super::{exit_code_for, EXIT_CONFIG, EXIT_OK};
use crate::config::load_config;
use crate::core::coordinator::ActionCoordinator;
use clap::Args;

/// Arguments for the status command
#[derive(Args, Debug, Default)]
pub struct StatusArgs {
    /// Only show orders that are not flagged as exported
    #[arg(long)]
    pub pending: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Checking export status");

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let coordinator = match ActionCoordinator::from_config(&config) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Invalid security configuration");
                println!("   Error: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        let mut report = match coordinator.status_report().await {
            Ok(r) => r,
            Err(e) => {
                println!("❌ Failed to read order store");
                println!("   Error: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        let (total, exported, selectable) = (
            report.total(),
            report.exported_count(),
            report.selectable_count(),
        );

        if self.pending {
            report.entries.retain(|e| !e.exported);
        }

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(EXIT_OK);
        }

        println!("📊 Export Status");
        println!();
        println!("  Exported Flag: {:?}", report.marker_field);
        println!("  Completed Orders: {total}");
        println!("  Exported: {exported}");
        println!("  Not Exported: {}", total - exported);
        println!("  Picked Up By Next Export: {selectable}");
        println!();

        if report.entries.is_empty() {
            println!("No orders to show.");
            return Ok(EXIT_OK);
        }

        println!(
            "{:<12} {:<20} {:<32} {:>12}  Exported",
            "Order", "Date", "Billing Email", "Total"
        );
        println!("{}", "-".repeat(88));
        for entry in &report.entries {
            println!(
                "{:<12} {:<20} {:<32} {:>12}  {}",
                entry.order_id.as_str(),
                entry.order_date,
                entry.billing_email,
                entry.order_total,
                if entry.exported { "Yes" } else { "No" }
            );
        }

        Ok(EXIT_OK)
    }
}
