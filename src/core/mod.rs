//! Core business logic for the order exporter.
//!
//! # Modules
//!
//! - [`settings`] - Export settings read from the store's options
//! - [`access`] - Token and capability guard for admin actions
//! - [`export`] - Export engine, row projection and CSV payload
//! - [`reset`] - Exported flag reset engine
//! - [`status`] - Read-only exported status view
//! - [`coordinator`] - Guarded entry point tying the above together
//!
//! # Export Workflow
//!
//! 1. **Authorize**: Check the action token and the `manage_store` capability
//! 2. **Load Settings**: Read custom fields and the marker name from the store
//! 3. **Select**: Query completed orders without the marker key
//! 4. **Project and Mark**: Build each row, then set the marker on that order
//! 5. **Encode**: Write the rows as CSV under a timestamped file name
//!
//! # Example
//!
//! ```rust,no_run
//! use order_exporter::config::{load_config, secret_string};
//! use order_exporter::core::access::{AccessRequest, MANAGE_STORE};
//! use order_exporter::core::coordinator::ActionCoordinator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("order-exporter.toml")?;
//! let coordinator = ActionCoordinator::from_config(&config)?;
//!
//! let request = AccessRequest::new(
//!     Some(secret_string("token-from-the-form".to_string())),
//!     vec![MANAGE_STORE.to_string()],
//! );
//! let outcome = coordinator.export_orders(&request).await?;
//!
//! println!("File: {}", outcome.payload.file_name());
//! println!("Rows: {}", outcome.payload.row_count());
//! # Ok(())
//! # }
//! ```

pub mod access;
pub mod coordinator;
pub mod export;
pub mod reset;
pub mod settings;
pub mod status;
