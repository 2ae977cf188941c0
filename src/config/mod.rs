//! Configuration management for the order exporter.
//!
//! TOML configuration with:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `ORDER_EXPORTER_<SECTION>_<KEY>` overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [store]
//! backend = "json_file"
//! path = "/srv/shop/orders.json"
//!
//! [export]
//! output_dir = "/srv/shop/exports"
//! filename_prefix = "wc_order_export"
//!
//! [security]
//! action_token = "${ORDER_EXPORTER_ACTION_TOKEN}"
//! operator_capabilities = ["manage_store"]
//!
//! [logging]
//! local_enabled = true
//! local_path = "/var/log/order-exporter"
//! local_rotation = "daily"
//! ```
//!
//! The custom field list and exported flag name are not part of this file.
//! They are store options, see [`crate::core::settings`].

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::load_config;
pub use schema::{
    ApplicationConfig, ExportConfig, ExporterConfig, LoggingConfig, SecurityConfig, StoreBackend,
    StoreConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
