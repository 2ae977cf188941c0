//! Domain models and types for the order exporter.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`OrderId`])
//! - **Domain models** ([`Order`], [`OrderStatus`])
//! - **Error types** ([`ExporterError`], [`StoreError`])
//! - **Result type alias** ([`Result`])
//!
//! # Builder Pattern
//!
//! ```rust
//! use order_exporter::domain::{Order, OrderStatus};
//! use chrono::Utc;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let order = Order::builder()
//!     .id("1042")?
//!     .status(OrderStatus::Completed)
//!     .date_created(Utc::now())
//!     .billing_email("jane@example.com")
//!     .build()?;
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod ids;
pub mod order;
pub mod result;

pub use errors::{ExporterError, StoreError};
pub use ids::OrderId;
pub use order::{Order, OrderBuilder, OrderStatus};
pub use result::Result;
