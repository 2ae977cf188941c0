//! JSON snapshot document model
//!
//! A snapshot is the whole store in one file:
//!
//! ```json
//! {
//!   "options": {
//!     "wc_order_exporter_custom_fields": "sku, region",
//!     "wc_order_exporter_exported_flag": "_exported"
//!   },
//!   "orders": [
//!     {
//!       "id": 1042,
//!       "status": "completed",
//!       "date_created": "2024-03-09T14:05:07Z",
//!       "billing_email": "jane@example.com",
//!       "total": "49.90",
//!       "metadata": { "sku": "ABC123" }
//!     }
//!   ]
//! }
//! ```

use crate::domain::errors::StoreError;
use crate::domain::order::Order;
use crate::domain::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Store snapshot: site options plus orders in store order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Named site options
    #[serde(default)]
    pub options: BTreeMap<String, String>,

    /// Orders, in the order queries return them
    #[serde(default)]
    pub orders: Vec<Order>,
}

impl Snapshot {
    /// Read and decode a snapshot file
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the file cannot be read and
    /// [`StoreError::Corrupt`] if it is not a valid snapshot.
    pub async fn load(path: &Path) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            StoreError::Unavailable(format!("Failed to read {}: {e}", path.display()))
        })?;
        let snapshot: Snapshot = serde_json::from_str(&raw)
            .map_err(|e| StoreError::Corrupt(format!("{}: {e}", path.display())))?;

        tracing::debug!(
            path = %path.display(),
            orders = snapshot.orders.len(),
            options = snapshot.options.len(),
            "Loaded store snapshot"
        );

        Ok(snapshot)
    }

    /// Encode and write the snapshot, replacing the file atomically
    ///
    /// Writes to a sibling temporary file and renames it over `path`.
    pub async fn save(&self, path: &Path) -> std::io::Result<()> {
        let encoded = serde_json::to_vec_pretty(self)?;
        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        tokio::fs::write(&tmp, encoded).await?;
        tokio::fs::rename(&tmp, path).await
    }
}
