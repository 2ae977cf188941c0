// Order Exporter - Completed orders to CSV with exported-flag tracking
// Copyright (c) 2025 Order Exporter Contributors
// Licensed under the MIT License

//! # Order Exporter
//!
//! Batch exporter for completed e-commerce orders. Each run writes every
//! completed order that does not yet carry the exported flag to a CSV file,
//! then sets the flag on it so the next run skips it. A separate action
//! clears the flag on all completed orders.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (settings, access guard, export, reset, status)
//! - [`adapters`] - Order store integrations (JSON snapshot, in-memory)
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use order_exporter::config::{load_config, secret_string};
//! use order_exporter::core::access::{AccessRequest, MANAGE_STORE};
//! use order_exporter::core::coordinator::ActionCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("order-exporter.toml")?;
//!     let coordinator = ActionCoordinator::from_config(&config)?;
//!
//!     let request = AccessRequest::new(
//!         Some(secret_string("token".to_string())),
//!         vec![MANAGE_STORE.to_string()],
//!     );
//!     let outcome = coordinator.export_orders(&request).await?;
//!
//!     std::fs::write(outcome.payload.file_name(), outcome.payload.body())?;
//!     println!("Exported {} orders", outcome.summary.exported_count());
//!     Ok(())
//! }
//! ```
//!
//! ## Engines without the guard
//!
//! The engines can be driven directly against any [`adapters::store::OrderStore`]:
//!
//! ```rust
//! use order_exporter::adapters::memory::InMemoryOrderStore;
//! use order_exporter::core::export::OrderExportEngine;
//! use order_exporter::core::reset::FlagResetEngine;
//! use order_exporter::core::settings::ExportSettings;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(InMemoryOrderStore::new());
//! let settings = ExportSettings::from_options(Some("sku, region"), Some("_exported"));
//!
//! let outcome = OrderExportEngine::new(store.clone(), settings.clone())
//!     .export()
//!     .await?;
//! assert_eq!(outcome.payload.row_count(), 0);
//!
//! let reset = FlagResetEngine::new(store, settings).unset().await?;
//! assert_eq!(reset.cleared_count(), 0);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`domain::ExporterError`]. Store
//! failures arrive as [`domain::StoreError`] wrapped in
//! [`domain::ExporterError::Store`].

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
