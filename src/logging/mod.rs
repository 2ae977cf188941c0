//! Logging
//!
//! Events carry order IDs and counts as structured fields. The console
//! copy goes to stderr; an optional JSON file copy rotates on disk.
//!
//! # Example
//!
//! ```no_run
//! use order_exporter::logging::init_logging;
//! use order_exporter::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(order_id = "1042", "Order exported and marked");
//! ```

pub mod structured;

pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use order_exporter::log_error_with_context;
/// use order_exporter::domain::ExporterError;
///
/// let error = ExporterError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
