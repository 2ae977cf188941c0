//! JSON snapshot adapter implementing the store traits
//!
//! The snapshot is loaded once at open. Each metadata write or delete
//! updates the in-memory copy and rewrites the file before returning, so
//! every marker change is durable on its own, like a per-row database
//! write. A failed rewrite rolls the in-memory change back.

use crate::adapters::json_file::models::Snapshot;
use crate::adapters::store::traits::{OrderQuery, OrderStore, SettingsStore};
use crate::domain::errors::StoreError;
use crate::domain::ids::OrderId;
use crate::domain::order::{Order, OrderStatus};
use crate::domain::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// JSON snapshot implementation of [`OrderStore`] and [`SettingsStore`]
pub struct JsonFileStore {
    path: PathBuf,
    snapshot: Mutex<Snapshot>,
}

impl JsonFileStore {
    /// Open a snapshot file
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or not a valid snapshot.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let snapshot = Snapshot::load(&path).await?;

        tracing::info!(
            path = %path.display(),
            orders = snapshot.orders.len(),
            "Opened JSON order store"
        );

        Ok(Self {
            path,
            snapshot: Mutex::new(snapshot),
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl OrderStore for JsonFileStore {
    fn backend_name(&self) -> &str {
        "json_file"
    }

    async fn query_orders(&self, query: &OrderQuery) -> Result<Vec<Order>> {
        let snapshot = self.snapshot.lock().await;
        Ok(snapshot
            .orders
            .iter()
            .filter(|o| query.matches(o))
            .cloned()
            .collect())
    }

    async fn orders_with_status(&self, status: OrderStatus) -> Result<Vec<Order>> {
        let snapshot = self.snapshot.lock().await;
        Ok(snapshot
            .orders
            .iter()
            .filter(|o| o.status == status)
            .cloned()
            .collect())
    }

    async fn get_meta(&self, order_id: &OrderId, key: &str) -> Result<Option<String>> {
        let snapshot = self.snapshot.lock().await;
        let order = snapshot
            .orders
            .iter()
            .find(|o| &o.id == order_id)
            .ok_or_else(|| StoreError::OrderNotFound(order_id.to_string()))?;
        Ok(order.meta(key).map(str::to_string))
    }

    async fn update_meta(&self, order_id: &OrderId, key: &str, value: &str) -> Result<()> {
        let mut snapshot = self.snapshot.lock().await;
        let index = snapshot
            .orders
            .iter()
            .position(|o| &o.id == order_id)
            .ok_or_else(|| StoreError::OrderNotFound(order_id.to_string()))?;

        let previous = snapshot.orders[index]
            .metadata
            .insert(key.to_string(), value.to_string());

        if let Err(e) = snapshot.save(&self.path).await {
            let metadata = &mut snapshot.orders[index].metadata;
            match previous {
                Some(old) => metadata.insert(key.to_string(), old),
                None => metadata.remove(key),
            };
            return Err(StoreError::WriteFailed {
                order_id: order_id.to_string(),
                key: key.to_string(),
                message: e.to_string(),
            }
            .into());
        }

        Ok(())
    }

    async fn delete_meta(&self, order_id: &OrderId, key: &str) -> Result<()> {
        let mut snapshot = self.snapshot.lock().await;
        let index = snapshot
            .orders
            .iter()
            .position(|o| &o.id == order_id)
            .ok_or_else(|| StoreError::OrderNotFound(order_id.to_string()))?;

        let Some(previous) = snapshot.orders[index].metadata.remove(key) else {
            return Ok(());
        };

        if let Err(e) = snapshot.save(&self.path).await {
            snapshot.orders[index]
                .metadata
                .insert(key.to_string(), previous);
            return Err(StoreError::DeleteFailed {
                order_id: order_id.to_string(),
                key: key.to_string(),
                message: e.to_string(),
            }
            .into());
        }

        Ok(())
    }
}

#[async_trait]
impl SettingsStore for JsonFileStore {
    async fn get_option(&self, name: &str) -> Result<Option<String>> {
        Ok(self.snapshot.lock().await.options.get(name).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SNAPSHOT: &str = r#"{
        "options": {"wc_order_exporter_exported_flag": "_exported"},
        "orders": [
            {"id": 1, "status": "completed", "date_created": "2024-03-09T14:05:07Z",
             "billing_email": "a@example.com", "total": "10.00"},
            {"id": 2, "status": "processing", "date_created": "2024-03-10T09:00:00Z",
             "billing_email": "b@example.com", "total": "20.00"}
        ]
    }"#;

    async fn open_fixture(dir: &TempDir) -> JsonFileStore {
        let path = dir.path().join("orders.json");
        tokio::fs::write(&path, SNAPSHOT).await.unwrap();
        JsonFileStore::open(&path).await.unwrap()
    }

    #[tokio::test]
    async fn test_update_meta_is_persisted() {
        let dir = TempDir::new().unwrap();
        let store = open_fixture(&dir).await;
        let id = OrderId::new("1").unwrap();

        store.update_meta(&id, "_exported", "1").await.unwrap();

        let reopened = JsonFileStore::open(store.path()).await.unwrap();
        assert_eq!(
            reopened.get_meta(&id, "_exported").await.unwrap(),
            Some("1".to_string())
        );
    }

    #[tokio::test]
    async fn test_delete_meta_is_persisted() {
        let dir = TempDir::new().unwrap();
        let store = open_fixture(&dir).await;
        let id = OrderId::new("1").unwrap();

        store.update_meta(&id, "_exported", "1").await.unwrap();
        store.delete_meta(&id, "_exported").await.unwrap();

        let reopened = JsonFileStore::open(store.path()).await.unwrap();
        assert_eq!(reopened.get_meta(&id, "_exported").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_query_and_options() {
        let dir = TempDir::new().unwrap();
        let store = open_fixture(&dir).await;

        let unexported = store
            .query_orders(&OrderQuery::completed_without("_exported"))
            .await
            .unwrap();
        assert_eq!(unexported.len(), 1);
        assert_eq!(unexported[0].id.as_str(), "1");

        let processing = store
            .orders_with_status(OrderStatus::Processing)
            .await
            .unwrap();
        assert_eq!(processing.len(), 1);

        assert_eq!(
            store
                .get_option("wc_order_exporter_exported_flag")
                .await
                .unwrap(),
            Some("_exported".to_string())
        );
    }

    #[tokio::test]
    async fn test_write_failure_rolls_back() {
        let dir = TempDir::new().unwrap();
        let store = open_fixture(&dir).await;
        let id = OrderId::new("1").unwrap();

        // Removing the directory makes the temp-file write fail.
        let path = store.path().to_path_buf();
        drop(dir);

        let err = store.update_meta(&id, "_exported", "1").await.unwrap_err();
        assert!(err.to_string().contains("Failed to write metadata"));
        assert_eq!(store.get_meta(&id, "_exported").await.unwrap(), None);
        assert!(!path.exists());
    }
}
