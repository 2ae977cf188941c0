//! Admin action coordinator
//!
//! Entry point for the two guarded actions and the status view. Each call
//! is one invocation: the request is authorized first, then the export
//! settings are read from the settings store and handed to a fresh engine.
//! A coordinator built from configuration opens its store on first use,
//! after the guard has passed, so a rejected request never reads it.

use crate::adapters::store::{create_stores, OrderStore, SettingsStore};
use crate::config::ExporterConfig;
use crate::core::access::{AccessGuard, AccessRequest, AdminAction};
use crate::core::export::{ExportOutcome, OrderExportEngine};
use crate::core::reset::{FlagResetEngine, ResetOutcome};
use crate::core::settings::ExportSettings;
use crate::core::status::OrderStatusReport;
use crate::domain::{ExporterError, Result};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::OnceCell;

type StoreHandles = (
    Arc<dyn OrderStore + Send + Sync>,
    Arc<dyn SettingsStore + Send + Sync>,
);

/// Coordinates guarded admin actions against one store
pub struct ActionCoordinator {
    stores: OnceCell<StoreHandles>,
    store_config: Option<ExporterConfig>,
    guard: AccessGuard,
    filename_prefix: String,
}

impl ActionCoordinator {
    /// Create a coordinator from existing stores
    pub fn new(
        orders: Arc<dyn OrderStore + Send + Sync>,
        settings: Arc<dyn SettingsStore + Send + Sync>,
        guard: AccessGuard,
        filename_prefix: impl Into<String>,
    ) -> Self {
        Self {
            stores: OnceCell::new_with(Some((orders, settings))),
            store_config: None,
            guard,
            filename_prefix: filename_prefix.into(),
        }
    }

    /// Build the guard from configuration; the store is opened on first use
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no action token is configured
    pub fn from_config(config: &ExporterConfig) -> Result<Self> {
        let guard = AccessGuard::from_config(&config.security)?;

        Ok(Self {
            stores: OnceCell::new(),
            store_config: Some(config.clone()),
            guard,
            filename_prefix: config.export.filename_prefix.clone(),
        })
    }

    /// Check a request against the guard without touching the store
    ///
    /// # Errors
    ///
    /// Returns an authentication or authorization error
    pub fn authorize(&self, action: AdminAction, request: &AccessRequest) -> Result<()> {
        self.guard.authorize(action, request)
    }

    async fn stores(&self) -> Result<&StoreHandles> {
        self.stores
            .get_or_try_init(|| async {
                match &self.store_config {
                    Some(config) => create_stores(config).await,
                    None => Err(ExporterError::Configuration(
                        "No order store configured".to_string(),
                    )),
                }
            })
            .await
    }

    /// Read the export settings for this invocation
    ///
    /// # Errors
    ///
    /// Returns an error if the settings store cannot be read
    pub async fn load_settings(&self) -> Result<ExportSettings> {
        let (_, settings) = self.stores().await?;
        ExportSettings::load(settings.as_ref()).await
    }

    /// Authorize, then export and mark every unexported completed order
    ///
    /// # Errors
    ///
    /// Returns an access error before touching the store, or the first
    /// store or encoding error
    pub async fn export_orders(&self, request: &AccessRequest) -> Result<ExportOutcome> {
        self.export_orders_at(request, Utc::now()).await
    }

    /// Like [`export_orders`](Self::export_orders), with a fixed timestamp
    pub async fn export_orders_at(
        &self,
        request: &AccessRequest,
        now: DateTime<Utc>,
    ) -> Result<ExportOutcome> {
        self.authorize(AdminAction::ExportOrders, request)?;

        let (orders, _) = self.stores().await?;
        let settings = self.load_settings().await?;
        OrderExportEngine::new(orders.clone(), settings)
            .with_filename_prefix(self.filename_prefix.as_str())
            .export_at(now)
            .await
    }

    /// Authorize, then clear the marker on every completed order
    ///
    /// # Errors
    ///
    /// Returns an access error before touching the store, or the first
    /// store error
    pub async fn unset_exported_flag(&self, request: &AccessRequest) -> Result<ResetOutcome> {
        self.authorize(AdminAction::UnsetExportedFlag, request)?;

        let (orders, _) = self.stores().await?;
        let settings = self.load_settings().await?;
        FlagResetEngine::new(orders.clone(), settings)
            .unset()
            .await
    }

    /// Exported status of every completed order; read-only, not guarded
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read
    pub async fn status_report(&self) -> Result<OrderStatusReport> {
        let (orders, _) = self.stores().await?;
        let settings = self.load_settings().await?;
        OrderStatusReport::collect(orders.as_ref(), &settings).await
    }
}
