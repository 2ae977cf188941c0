//! Order store factory
//!
//! Builds the order store and settings store from configuration.

use crate::adapters::json_file::{JsonFileStore, Snapshot};
use crate::adapters::memory::InMemoryOrderStore;
use crate::adapters::store::traits::{OrderStore, SettingsStore};
use crate::config::schema::{ExporterConfig, StoreBackend};
use crate::domain::Result;
use std::path::Path;
use std::sync::Arc;

/// Create both the order store and the settings store from the same backend
///
/// The two handles share one underlying adapter, so options and orders are
/// read from the same snapshot. Dry runs always get the memory backend.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be opened or decoded
pub async fn create_stores(
    config: &ExporterConfig,
) -> Result<(
    Arc<dyn OrderStore + Send + Sync>,
    Arc<dyn SettingsStore + Send + Sync>,
)> {
    let path = Path::new(&config.store.path);

    match config.effective_backend() {
        StoreBackend::JsonFile => {
            tracing::info!(path = %path.display(), "Creating JSON file order store");
            let adapter = Arc::new(JsonFileStore::open(path).await?);

            Ok((
                adapter.clone() as Arc<dyn OrderStore + Send + Sync>,
                adapter as Arc<dyn SettingsStore + Send + Sync>,
            ))
        }
        StoreBackend::Memory => {
            tracing::info!(
                path = %path.display(),
                "Creating in-memory order store from snapshot (writes are not persisted)"
            );
            let snapshot = Snapshot::load(path).await?;
            let adapter = Arc::new(InMemoryOrderStore::with_data(
                snapshot.orders,
                snapshot.options,
            ));

            Ok((
                adapter.clone() as Arc<dyn OrderStore + Send + Sync>,
                adapter as Arc<dyn SettingsStore + Send + Sync>,
            ))
        }
    }
}
