//! External system integrations for the order exporter.
//!
//! - [`store`] - Order store abstraction layer (traits and factory)
//! - [`json_file`] - JSON snapshot file implementation
//! - [`memory`] - In-memory implementation
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate the shop's storage
//! from the engines and allow testing against the in-memory store.
//!
//! ```rust
//! use order_exporter::adapters::memory::InMemoryOrderStore;
//! use order_exporter::adapters::store::{OrderQuery, OrderStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = InMemoryOrderStore::new();
//! let pending = store
//!     .query_orders(&OrderQuery::completed_without("_exported"))
//!     .await?;
//! assert!(pending.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod json_file;
pub mod memory;
pub mod store;
