//! Export summary and reporting
//!
//! This module defines structures for tracking and reporting export results.

use crate::domain::ids::OrderId;
use std::time::Duration;

/// Summary of one export run
#[derive(Debug, Clone, Default)]
pub struct ExportSummary {
    /// Marker field the run selected on and wrote
    pub marker_field: String,

    /// Number of custom columns after the fixed ones
    pub custom_columns: usize,

    /// Orders marked as exported, in output order
    pub exported_orders: Vec<OrderId>,

    /// Name of the produced file
    pub file_name: String,

    /// Duration of the export
    pub duration: Duration,
}

impl ExportSummary {
    /// Create a new empty export summary
    pub fn new(marker_field: impl Into<String>, custom_columns: usize) -> Self {
        Self {
            marker_field: marker_field.into(),
            custom_columns,
            ..Self::default()
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record one order that was written and marked
    pub fn add_exported(&mut self, order_id: OrderId) {
        self.exported_orders.push(order_id);
    }

    pub fn exported_count(&self) -> usize {
        self.exported_orders.len()
    }

    /// Whether the run found nothing to export
    pub fn is_empty(&self) -> bool {
        self.exported_orders.is_empty()
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            exported = self.exported_count(),
            custom_columns = self.custom_columns,
            marker_field = %self.marker_field,
            file_name = %self.file_name,
            duration_ms = self.duration.as_millis() as u64,
            "Export completed"
        );

        if self.is_empty() {
            tracing::info!("No unexported completed orders; payload holds the header only");
        }
    }
}
