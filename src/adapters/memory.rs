//! In-memory order store
//!
//! Holds orders and options behind `tokio` locks. Used by tests, by
//! embedders that already hold their orders in memory, and by dry runs,
//! where a snapshot is loaded here so marker writes never reach disk.

use crate::adapters::store::traits::{OrderQuery, OrderStore, SettingsStore};
use crate::domain::errors::StoreError;
use crate::domain::ids::OrderId;
use crate::domain::order::{Order, OrderStatus};
use crate::domain::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// In-memory implementation of [`OrderStore`] and [`SettingsStore`]
///
/// Orders keep their insertion order, which is the order queries return.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<Vec<Order>>,
    options: RwLock<BTreeMap<String, String>>,
}

impl InMemoryOrderStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-loaded with orders and options
    pub fn with_data(orders: Vec<Order>, options: BTreeMap<String, String>) -> Self {
        Self {
            orders: RwLock::new(orders),
            options: RwLock::new(options),
        }
    }

    /// Append an order
    pub async fn insert_order(&self, order: Order) {
        self.orders.write().await.push(order);
    }

    /// Save an option value
    pub async fn set_option(&self, name: impl Into<String>, value: impl Into<String>) {
        self.options.write().await.insert(name.into(), value.into());
    }

    /// Copy of one order, if present
    pub async fn order(&self, order_id: &OrderId) -> Option<Order> {
        self.orders
            .read()
            .await
            .iter()
            .find(|o| &o.id == order_id)
            .cloned()
    }

    /// Copy of every order, in store order
    pub async fn all_orders(&self) -> Vec<Order> {
        self.orders.read().await.clone()
    }

    fn not_found(order_id: &OrderId) -> StoreError {
        StoreError::OrderNotFound(order_id.to_string())
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    fn backend_name(&self) -> &str {
        "memory"
    }

    async fn query_orders(&self, query: &OrderQuery) -> Result<Vec<Order>> {
        Ok(self
            .orders
            .read()
            .await
            .iter()
            .filter(|o| query.matches(o))
            .cloned()
            .collect())
    }

    async fn orders_with_status(&self, status: OrderStatus) -> Result<Vec<Order>> {
        Ok(self
            .orders
            .read()
            .await
            .iter()
            .filter(|o| o.status == status)
            .cloned()
            .collect())
    }

    async fn get_meta(&self, order_id: &OrderId, key: &str) -> Result<Option<String>> {
        let orders = self.orders.read().await;
        let order = orders
            .iter()
            .find(|o| &o.id == order_id)
            .ok_or_else(|| Self::not_found(order_id))?;
        Ok(order.meta(key).map(str::to_string))
    }

    async fn update_meta(&self, order_id: &OrderId, key: &str, value: &str) -> Result<()> {
        let mut orders = self.orders.write().await;
        let order = orders
            .iter_mut()
            .find(|o| &o.id == order_id)
            .ok_or_else(|| Self::not_found(order_id))?;
        order.metadata.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete_meta(&self, order_id: &OrderId, key: &str) -> Result<()> {
        let mut orders = self.orders.write().await;
        let order = orders
            .iter_mut()
            .find(|o| &o.id == order_id)
            .ok_or_else(|| Self::not_found(order_id))?;
        order.metadata.remove(key);
        Ok(())
    }
}

#[async_trait]
impl SettingsStore for InMemoryOrderStore {
    async fn get_option(&self, name: &str) -> Result<Option<String>> {
        Ok(self.options.read().await.get(name).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ExporterError;
    use chrono::Utc;

    fn order(id: &str, status: OrderStatus) -> Order {
        Order::builder()
            .id(id)
            .unwrap()
            .status(status)
            .date_created(Utc::now())
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_query_preserves_insertion_order() {
        let store = InMemoryOrderStore::new();
        store.insert_order(order("30", OrderStatus::Completed)).await;
        store.insert_order(order("10", OrderStatus::Completed)).await;
        store.insert_order(order("20", OrderStatus::Processing)).await;

        let found = store
            .query_orders(&OrderQuery::completed_without("_exported"))
            .await
            .unwrap();
        let ids: Vec<&str> = found.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["30", "10"]);
    }

    #[tokio::test]
    async fn test_meta_round_trip() {
        let store = InMemoryOrderStore::new();
        store.insert_order(order("1", OrderStatus::Completed)).await;
        let id = OrderId::new("1").unwrap();

        assert_eq!(store.get_meta(&id, "_exported").await.unwrap(), None);
        store.update_meta(&id, "_exported", "1").await.unwrap();
        assert_eq!(
            store.get_meta(&id, "_exported").await.unwrap(),
            Some("1".to_string())
        );
        store.delete_meta(&id, "_exported").await.unwrap();
        assert_eq!(store.get_meta(&id, "_exported").await.unwrap(), None);

        // deleting an absent key is fine
        store.delete_meta(&id, "_exported").await.unwrap();
    }

    #[tokio::test]
    async fn test_unknown_order() {
        let store = InMemoryOrderStore::new();
        let id = OrderId::new("404").unwrap();
        let err = store.update_meta(&id, "k", "v").await.unwrap_err();
        assert!(matches!(
            err,
            ExporterError::Store(StoreError::OrderNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_options() {
        let store = InMemoryOrderStore::new();
        assert_eq!(store.get_option("missing").await.unwrap(), None);
        store.set_option("wc_order_exporter_exported_flag", "_exported").await;
        assert_eq!(
            store
                .get_option("wc_order_exporter_exported_flag")
                .await
                .unwrap(),
            Some("_exported".to_string())
        );
    }
}
