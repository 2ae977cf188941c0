//! Order domain model
//!
//! Orders are owned by the external store. The exporter reads their fixed
//! fields and reads, writes and deletes entries in their metadata map.

use super::ids::OrderId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of an order
///
/// Serialized in the store's slug form (`completed`, `on-hold`, ...) and
/// read through [`FromStr`], so `wc-` prefixed post statuses load too. Only
/// [`OrderStatus::Completed`] orders are ever selected for export or reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum OrderStatus {
    Pending,
    Processing,
    OnHold,
    Completed,
    Cancelled,
    Refunded,
    Failed,
}

impl OrderStatus {
    /// Store slug for this status
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::OnHold => "on-hold",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Refunded => "refunded",
            OrderStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    /// Accepts both bare slugs and `wc-` prefixed post statuses.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        let slug = lowered.strip_prefix("wc-").unwrap_or(lowered.as_str());
        match slug {
            "pending" => Ok(OrderStatus::Pending),
            "processing" => Ok(OrderStatus::Processing),
            "on-hold" => Ok(OrderStatus::OnHold),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            "refunded" => Ok(OrderStatus::Refunded),
            "failed" => Ok(OrderStatus::Failed),
            other => Err(format!("Unknown order status: {other}")),
        }
    }
}

impl TryFrom<String> for OrderStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// An e-commerce order record
///
/// # Examples
///
/// ```
/// use order_exporter::domain::order::{Order, OrderStatus};
/// use chrono::Utc;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let order = Order::builder()
///     .id("1042")
///     .unwrap()
///     .status(OrderStatus::Completed)
///     .date_created(Utc::now())
///     .billing_email("jane@example.com")
///     .total(Decimal::from_str("49.90").unwrap())
///     .meta("sku", "ABC123")
///     .build()
///     .unwrap();
///
/// assert_eq!(order.meta("sku"), Some("ABC123"));
/// assert!(!order.has_meta("_exported"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Store identifier
    pub id: OrderId,

    /// Lifecycle state
    pub status: OrderStatus,

    /// Creation timestamp
    pub date_created: DateTime<Utc>,

    /// Billing email address
    #[serde(default)]
    pub billing_email: String,

    /// Order total
    pub total: Decimal,

    /// Sparse per-order key/value metadata
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl Order {
    /// Creates a new builder for constructing an Order
    pub fn builder() -> OrderBuilder {
        OrderBuilder::default()
    }

    /// Reads a metadata value
    pub fn meta(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    /// Reads a metadata value, defaulting to the empty string
    pub fn meta_or_empty(&self, key: &str) -> &str {
        self.meta(key).unwrap_or("")
    }

    /// Whether a metadata key is present, whatever its value
    pub fn has_meta(&self, key: &str) -> bool {
        self.metadata.contains_key(key)
    }
}

/// Builder for constructing Order instances
#[derive(Debug, Default)]
pub struct OrderBuilder {
    id: Option<OrderId>,
    status: Option<OrderStatus>,
    date_created: Option<DateTime<Utc>>,
    billing_email: Option<String>,
    total: Option<Decimal>,
    metadata: BTreeMap<String, String>,
}

impl OrderBuilder {
    /// Creates a new OrderBuilder
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the order ID
    ///
    /// # Errors
    ///
    /// Returns an error if the ID is empty
    pub fn id(mut self, id: impl Into<String>) -> Result<Self, String> {
        self.id = Some(OrderId::new(id)?);
        Ok(self)
    }

    /// Sets the order status
    pub fn status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the creation timestamp
    pub fn date_created(mut self, date_created: DateTime<Utc>) -> Self {
        self.date_created = Some(date_created);
        self
    }

    /// Sets the billing email
    pub fn billing_email(mut self, email: impl Into<String>) -> Self {
        self.billing_email = Some(email.into());
        self
    }

    /// Sets the order total
    pub fn total(mut self, total: Decimal) -> Self {
        self.total = Some(total);
        self
    }

    /// Adds a metadata entry
    pub fn meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Builds the Order
    ///
    /// # Errors
    ///
    /// Returns an error if any required field is missing
    pub fn build(self) -> Result<Order, String> {
        Ok(Order {
            id: self.id.ok_or("id is required")?,
            status: self.status.ok_or("status is required")?,
            date_created: self.date_created.ok_or("date_created is required")?,
            billing_email: self.billing_email.unwrap_or_default(),
            total: self.total.unwrap_or_default(),
            metadata: self.metadata,
        })
    }
}
