//! Order export engine
//!
//! Selects completed orders that do not carry the marker field, projects
//! each one into a row and marks it, then encodes the rows as CSV.
//!
//! Marking happens per order, right after its row is built, and nothing is
//! rolled back. If a store write fails half way, the orders before it stay
//! marked and the error is returned without a payload; the next run picks
//! up only the orders that are still unmarked.

use crate::adapters::store::{OrderQuery, OrderStore};
use crate::core::export::payload::{export_file_name, CsvPayload, DEFAULT_FILENAME_PREFIX};
use crate::core::export::row::ExportRow;
use crate::core::export::summary::ExportSummary;
use crate::core::settings::ExportSettings;
use crate::domain::Result;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Instant;

/// Value written into the marker field
pub const MARKER_VALUE: &str = "1";

/// Result of a successful export
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub payload: CsvPayload,
    pub summary: ExportSummary,
}

/// Export engine
pub struct OrderExportEngine {
    store: Arc<dyn OrderStore + Send + Sync>,
    settings: ExportSettings,
    filename_prefix: String,
}

impl OrderExportEngine {
    /// Create an engine for one invocation
    pub fn new(store: Arc<dyn OrderStore + Send + Sync>, settings: ExportSettings) -> Self {
        Self {
            store,
            settings,
            filename_prefix: DEFAULT_FILENAME_PREFIX.to_string(),
        }
    }

    /// Override the payload file name prefix
    pub fn with_filename_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.filename_prefix = prefix.into();
        self
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    /// Export and mark every unexported completed order
    ///
    /// # Errors
    ///
    /// Returns the first store or encoding error; see the module docs for
    /// the state the store is left in.
    pub async fn export(&self) -> Result<ExportOutcome> {
        self.export_at(Utc::now()).await
    }

    /// Like [`export`](Self::export), with the file name timestamp fixed
    pub async fn export_at(&self, now: DateTime<Utc>) -> Result<ExportOutcome> {
        let start = Instant::now();
        let marker = self.settings.marker_field_name();
        let custom_fields = self.settings.custom_field_names();

        if self.settings.has_empty_marker() {
            tracing::warn!("Exported flag name is empty; the empty metadata key is used as the marker");
        }

        let orders = self
            .store
            .query_orders(&OrderQuery::completed_without(marker))
            .await?;

        tracing::info!(
            backend = self.store.backend_name(),
            marker_field = %marker,
            selected = orders.len(),
            "Selected unexported completed orders"
        );

        let mut summary = ExportSummary::new(marker, custom_fields.len());
        let mut rows = Vec::with_capacity(orders.len());

        for order in &orders {
            rows.push(ExportRow::from_order(order, custom_fields));

            self.store
                .update_meta(&order.id, marker, MARKER_VALUE)
                .await
                .inspect_err(|e| {
                    tracing::error!(
                        order_id = %order.id,
                        marked = summary.exported_count(),
                        error = %e,
                        "Failed to mark order as exported; aborting export"
                    );
                })?;

            tracing::debug!(order_id = %order.id, "Order exported and marked");
            summary.add_exported(order.id.clone());
        }

        let file_name = export_file_name(&self.filename_prefix, now);
        let payload = CsvPayload::render(file_name.as_str(), custom_fields, &rows)?;

        summary.file_name = file_name;
        let summary = summary.with_duration(start.elapsed());
        summary.log_summary();

        Ok(ExportOutcome { payload, summary })
    }
}
