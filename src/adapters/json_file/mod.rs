//! JSON snapshot file store
//!
//! A single JSON document holding the site options and every order. Stands
//! in for the shop database when the exporter runs as a standalone CLI.

pub mod adapter;
pub mod models;

pub use adapter::JsonFileStore;
pub use models::Snapshot;
