//! Order store abstraction layer
//!
//! Trait-based abstraction over the shop's order store, so the export and
//! reset engines run unchanged against any backend.

pub mod factory;
pub mod traits;

pub use factory::create_stores;
pub use traits::{MetaPresence, OrderQuery, OrderStore, SettingsStore};
