//! Order store abstraction traits
//!
//! This module defines the traits that order store adapters must implement
//! to work with the export and reset engines.

use crate::domain::ids::OrderId;
use crate::domain::order::{Order, OrderStatus};
use crate::domain::Result;
use async_trait::async_trait;

/// Presence test applied to one metadata key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaPresence {
    /// The key exists, whatever its value (including the empty string)
    Exists,
    /// The key is absent
    NotExists,
}

/// Filter for [`OrderStore::query_orders`]
///
/// Matches orders with the given status whose metadata key passes the
/// presence test. Values are never inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderQuery {
    /// Required order status
    pub status: OrderStatus,

    /// Metadata key to test
    pub meta_key: String,

    /// Presence test for `meta_key`
    pub presence: MetaPresence,
}

impl OrderQuery {
    /// Completed orders that do not carry `meta_key`
    pub fn completed_without(meta_key: impl Into<String>) -> Self {
        Self {
            status: OrderStatus::Completed,
            meta_key: meta_key.into(),
            presence: MetaPresence::NotExists,
        }
    }

    /// Completed orders that carry `meta_key`
    pub fn completed_with(meta_key: impl Into<String>) -> Self {
        Self {
            status: OrderStatus::Completed,
            meta_key: meta_key.into(),
            presence: MetaPresence::Exists,
        }
    }

    /// Evaluate the filter against one order
    pub fn matches(&self, order: &Order) -> bool {
        if order.status != self.status {
            return false;
        }
        let present = order.has_meta(&self.meta_key);
        match self.presence {
            MetaPresence::Exists => present,
            MetaPresence::NotExists => !present,
        }
    }
}

/// Order store trait
///
/// Reads are returned in store order; callers must not assume any sort.
/// Every call is independent: no transaction spans several calls.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Short backend name for logs
    fn backend_name(&self) -> &str;

    /// Orders matching a status and metadata-presence filter
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    async fn query_orders(&self, query: &OrderQuery) -> Result<Vec<Order>>;

    /// All orders with the given status
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    async fn orders_with_status(&self, status: OrderStatus) -> Result<Vec<Order>>;

    /// Read one metadata value; `Ok(None)` when the key is absent
    ///
    /// # Errors
    ///
    /// Returns an error if the order does not exist or the store cannot be read.
    async fn get_meta(&self, order_id: &OrderId, key: &str) -> Result<Option<String>>;

    /// Create or overwrite one metadata value
    ///
    /// # Errors
    ///
    /// Returns an error if the order does not exist or the write fails.
    async fn update_meta(&self, order_id: &OrderId, key: &str, value: &str) -> Result<()>;

    /// Remove one metadata key; removing an absent key is not an error
    ///
    /// # Errors
    ///
    /// Returns an error if the order does not exist or the write fails.
    async fn delete_meta(&self, order_id: &OrderId, key: &str) -> Result<()>;
}

/// Persisted key/value options (site settings)
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Read a named option; `Ok(None)` when it was never saved
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be read.
    async fn get_option(&self, name: &str) -> Result<Option<String>>;
}
