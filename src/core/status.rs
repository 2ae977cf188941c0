//! Exported status view
//!
//! Read-only report of completed orders and whether each one is flagged as
//! exported. The view uses the marker's value, unlike selection, which only
//! checks whether the key is present: `""` and `"0"` read as not exported
//! here even though export skips those orders and reset clears them.

use crate::adapters::store::OrderStore;
use crate::core::export::row::ORDER_DATE_FORMAT;
use crate::core::settings::ExportSettings;
use crate::domain::ids::OrderId;
use crate::domain::order::OrderStatus;
use crate::domain::Result;
use serde::Serialize;

/// Whether a stored marker value reads as "exported"
pub fn is_truthy_marker(value: Option<&str>) -> bool {
    !matches!(value, None | Some("") | Some("0"))
}

/// One line of the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderStatusEntry {
    pub order_id: OrderId,
    pub order_date: String,
    pub billing_email: String,
    pub order_total: String,
    /// Raw marker value, `None` when the key is absent
    pub marker_value: Option<String>,
    pub exported: bool,
}

/// Status of every completed order
#[derive(Debug, Clone, Default, Serialize)]
pub struct OrderStatusReport {
    pub marker_field: String,
    pub entries: Vec<OrderStatusEntry>,
}

impl OrderStatusReport {
    /// Read every completed order and its marker value
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read
    pub async fn collect(
        store: &(dyn OrderStore + Send + Sync),
        settings: &ExportSettings,
    ) -> Result<Self> {
        let marker = settings.marker_field_name();
        let orders = store.orders_with_status(OrderStatus::Completed).await?;

        let mut entries = Vec::with_capacity(orders.len());
        for order in orders {
            let marker_value = store.get_meta(&order.id, marker).await?;
            entries.push(OrderStatusEntry {
                order_date: order.date_created.format(ORDER_DATE_FORMAT).to_string(),
                billing_email: order.billing_email,
                order_total: order.total.to_string(),
                exported: is_truthy_marker(marker_value.as_deref()),
                marker_value,
                order_id: order.id,
            });
        }

        let report = Self {
            marker_field: marker.to_string(),
            entries,
        };

        tracing::debug!(
            completed = report.total(),
            exported = report.exported_count(),
            "Collected order export status"
        );

        Ok(report)
    }

    pub fn total(&self) -> usize {
        self.entries.len()
    }

    pub fn exported_count(&self) -> usize {
        self.entries.iter().filter(|e| e.exported).count()
    }

    pub fn pending_count(&self) -> usize {
        self.total() - self.exported_count()
    }

    /// Orders a new export would pick up (marker key absent)
    pub fn selectable_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.marker_value.is_none())
            .count()
    }
}
