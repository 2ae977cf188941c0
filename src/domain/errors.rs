//! Domain error types
//!
//! This module defines the error hierarchy for the order exporter.
//! Store adapters report failures through [`StoreError`] so that no
//! third-party I/O or parser types leak into the engines.

use thiserror::Error;

/// Main exporter error type
///
/// This is the primary error type used throughout the crate. Every
/// fallible operation at the engine boundary returns it.
#[derive(Debug, Error)]
pub enum ExporterError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Order store errors (read, query, metadata write/delete)
    #[error("Order store error: {0}")]
    Store(#[from] StoreError),

    /// Anti-forgery token missing or not matching
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Caller lacks the capability required for the operation
    #[error("Authorization error: {0}")]
    Authorization(String),

    /// Export process errors
    #[error("Export error: {0}")]
    Export(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl ExporterError {
    /// Whether the error came from the access guard
    pub fn is_access_denied(&self) -> bool {
        matches!(
            self,
            ExporterError::Authentication(_) | ExporterError::Authorization(_)
        )
    }
}

/// Order store errors
///
/// Errors raised by [`OrderStore`](crate::adapters::store::OrderStore) and
/// [`SettingsStore`](crate::adapters::store::SettingsStore) implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be opened or reached
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Order lookup failed
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// Metadata write failed
    #[error("Failed to write metadata '{key}' on order {order_id}: {message}")]
    WriteFailed {
        order_id: String,
        key: String,
        message: String,
    },

    /// Metadata delete failed
    #[error("Failed to delete metadata '{key}' on order {order_id}: {message}")]
    DeleteFailed {
        order_id: String,
        key: String,
        message: String,
    },

    /// Stored data could not be decoded
    #[error("Corrupt store data: {0}")]
    Corrupt(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for ExporterError {
    fn from(err: std::io::Error) -> Self {
        ExporterError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for ExporterError {
    fn from(err: serde_json::Error) -> Self {
        ExporterError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for ExporterError {
    fn from(err: toml::de::Error) -> Self {
        ExporterError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Conversion from csv writer errors
impl From<csv::Error> for ExporterError {
    fn from(err: csv::Error) -> Self {
        ExporterError::Serialization(format!("CSV error: {err}"))
    }
}
