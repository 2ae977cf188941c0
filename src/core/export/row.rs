//! Export rows
//!
//! One row per exported order: the four fixed columns followed by one
//! column per configured custom field.

use crate::domain::order::Order;

/// Fixed leading columns, in output order
pub const FIXED_COLUMNS: [&str; 4] = ["order_id", "order_date", "billing_email", "order_total"];

/// `order_date` column format
pub const ORDER_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Header row for the given custom fields
///
/// Expects names already cleaned by
/// [`ExportSettings`](crate::core::settings::ExportSettings), so no column
/// name repeats.
pub fn header<'a>(custom_field_names: &'a [String]) -> Vec<&'a str> {
    FIXED_COLUMNS
        .iter()
        .copied()
        .chain(custom_field_names.iter().map(String::as_str))
        .collect()
}

/// A projected order, ready to be written as one CSV record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub order_id: String,
    pub order_date: String,
    pub billing_email: String,
    pub order_total: String,
    /// Values aligned with the configured custom field names
    pub custom_values: Vec<String>,
}

impl ExportRow {
    /// Project an order onto the fixed columns and the custom fields
    ///
    /// A custom field missing from the order's metadata yields `""`.
    pub fn from_order(order: &Order, custom_field_names: &[String]) -> Self {
        Self {
            order_id: order.id.to_string(),
            order_date: order.date_created.format(ORDER_DATE_FORMAT).to_string(),
            billing_email: order.billing_email.clone(),
            order_total: order.total.to_string(),
            custom_values: custom_field_names
                .iter()
                .map(|name| order.meta_or_empty(name).to_string())
                .collect(),
        }
    }

    /// Field values in header order
    pub fn record(&self) -> Vec<&str> {
        [
            self.order_id.as_str(),
            self.order_date.as_str(),
            self.billing_email.as_str(),
            self.order_total.as_str(),
        ]
        .into_iter()
        .chain(self.custom_values.iter().map(String::as_str))
        .collect()
    }
}
