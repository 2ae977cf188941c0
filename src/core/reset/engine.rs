//! Flag reset engine

use crate::adapters::store::{OrderQuery, OrderStore};
use crate::core::settings::ExportSettings;
use crate::domain::ids::OrderId;
use crate::domain::Result;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Outcome of one reset run
#[derive(Debug, Clone, Default)]
pub struct ResetOutcome {
    /// Marker field that was cleared
    pub marker_field: String,

    /// Orders whose marker was removed, in store order
    pub cleared_orders: Vec<OrderId>,

    pub duration: Duration,
}

impl ResetOutcome {
    pub fn new(marker_field: impl Into<String>) -> Self {
        Self {
            marker_field: marker_field.into(),
            ..Self::default()
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn cleared_count(&self) -> usize {
        self.cleared_orders.len()
    }

    /// Log the outcome
    pub fn log_summary(&self) {
        tracing::info!(
            cleared = self.cleared_count(),
            marker_field = %self.marker_field,
            duration_ms = self.duration.as_millis() as u64,
            "Exported flag reset completed"
        );
    }
}

/// Reset engine
pub struct FlagResetEngine {
    store: Arc<dyn OrderStore + Send + Sync>,
    settings: ExportSettings,
}

impl FlagResetEngine {
    pub fn new(store: Arc<dyn OrderStore + Send + Sync>, settings: ExportSettings) -> Self {
        Self { store, settings }
    }

    /// Delete the marker from every completed order that has it
    ///
    /// Any value counts, including `""` and `"0"`. Running it twice is the
    /// same as running it once.
    ///
    /// # Errors
    ///
    /// Returns the first store error. Orders cleared before it stay cleared.
    pub async fn unset(&self) -> Result<ResetOutcome> {
        let start = Instant::now();
        let marker = self.settings.marker_field_name();

        if self.settings.has_empty_marker() {
            tracing::warn!("Exported flag name is empty; clearing the empty metadata key");
        }

        let orders = self
            .store
            .query_orders(&OrderQuery::completed_with(marker))
            .await?;

        tracing::info!(
            backend = self.store.backend_name(),
            marker_field = %marker,
            selected = orders.len(),
            "Selected completed orders carrying the exported flag"
        );

        let mut outcome = ResetOutcome::new(marker);
        for order in orders {
            self.store.delete_meta(&order.id, marker).await?;
            tracing::debug!(order_id = %order.id, "Exported flag cleared");
            outcome.cleared_orders.push(order.id);
        }

        let outcome = outcome.with_duration(start.elapsed());
        outcome.log_summary();
        Ok(outcome)
    }
}
