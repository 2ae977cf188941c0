//! Export command implementation
//!
//! This module implements the `export` command: export every completed
//! order that is not yet flagged, flag it, and write the CSV file.

use super::{access_request, exit_code_for, EXIT_CONFIG, EXIT_FATAL, EXIT_OK};
use crate::config::load_config;
use crate::core::coordinator::ActionCoordinator;
use crate::core::export::CsvPayload;
use crate::domain::{ExporterError, Result};
use clap::Args;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Arguments for the export command
#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// Anti-forgery token for the export action
    #[arg(long, env = "ORDER_EXPORTER_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Dry run mode - mark orders in memory only, nothing is persisted
    #[arg(long)]
    pub dry_run: bool,

    /// Override the output directory from the configuration
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<String>,

    /// Write the CSV to stdout instead of a file
    #[arg(long, conflicts_with = "output_dir")]
    pub stdout: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

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
        }

        if let Some(dir) = &self.output_dir {
            tracing::info!(output_dir = %dir, "Overriding output directory from CLI");
            config.export.output_dir = dir.clone();
        }

        if config.application.dry_run {
            tracing::info!("Dry run mode enabled - markers will not be persisted");
            eprintln!("🔍 DRY RUN MODE - Orders are marked in memory only");
        }

        let coordinator = match ActionCoordinator::from_config(&config) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Invalid security configuration");
                eprintln!("Failed to initialize export: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        let request = access_request(self.token.as_deref(), &config);
        let outcome = match coordinator.export_orders(&request).await {
            Ok(o) => o,
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        if self.stdout {
            let mut out = std::io::stdout().lock();
            out.write_all(outcome.payload.body())?;
            out.flush()?;
        } else {
            match write_payload(Path::new(&config.export.output_dir), &outcome.payload).await {
                Ok(path) => {
                    eprintln!("📄 Wrote {}", path.display());
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to write CSV file");
                    eprintln!("{e}");
                    eprintln!("   Exported orders are already flagged; run `unset` to export them again.");
                    return Ok(EXIT_FATAL);
                }
            }
        }

        let summary = &outcome.summary;
        eprintln!();
        eprintln!("📊 Export Summary:");
        eprintln!("  File: {}", outcome.payload.file_name());
        eprintln!("  Content-Type: {}", outcome.payload.content_type());
        eprintln!(
            "  Content-Disposition: {}",
            outcome.payload.content_disposition()
        );
        eprintln!("  Orders Exported: {}", summary.exported_count());
        eprintln!("  Custom Columns: {}", summary.custom_columns);
        eprintln!("  Exported Flag: {:?}", summary.marker_field);
        eprintln!("  Duration: {:.2}s", summary.duration.as_secs_f64());
        eprintln!();

        if summary.is_empty() {
            eprintln!("✅ No new completed orders to export");
        } else {
            eprintln!("✅ Export completed successfully!");
        }

        Ok(EXIT_OK)
    }
}

/// Write the payload into `dir`, creating it if needed
async fn write_payload(dir: &Path, payload: &CsvPayload) -> Result<PathBuf> {
    let path = dir.join(payload.file_name());
    let write_error =
        |e: std::io::Error| ExporterError::Export(format!("Failed to write {}: {e}", path.display()));

    tokio::fs::create_dir_all(dir).await.map_err(write_error)?;
    tokio::fs::write(&path, payload.body())
        .await
        .map_err(write_error)?;

    tracing::info!(path = %path.display(), bytes = payload.body().len(), "CSV file written");
    Ok(path)
}
