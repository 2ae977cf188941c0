//! Configuration schema types
//!
//! This module defines the configuration structure for the order exporter.
//! The two export settings themselves (custom fields and exported flag) are
//! not here: they live in the store's option table and are read through
//! [`SettingsStore`](crate::adapters::store::SettingsStore).

use crate::config::SecretString;
use serde::{Deserialize, Serialize};

/// Order store backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// JSON snapshot file, rewritten after every metadata change
    #[default]
    JsonFile,
    /// Snapshot loaded into memory, writes are discarded at exit
    Memory,
}

/// Main exporter configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExporterConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Order store settings
    pub store: StoreConfig,

    /// CSV output settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Access guard settings
    #[serde(default)]
    pub security: SecurityConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ExporterConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.store.validate()?;
        self.export.validate()?;
        self.security.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Backend actually used for this run; dry-run always stays in memory
    pub fn effective_backend(&self) -> StoreBackend {
        if self.application.dry_run {
            StoreBackend::Memory
        } else {
            self.store.backend
        }
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (markers are set in memory only)
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// Order store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Backend kind
    #[serde(default)]
    pub backend: StoreBackend,

    /// Path to the JSON snapshot holding `options` and `orders`
    pub path: String,
}

impl StoreConfig {
    fn validate(&self) -> Result<(), String> {
        if self.path.trim().is_empty() {
            return Err("store.path cannot be empty".to_string());
        }
        Ok(())
    }
}

/// CSV output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory the CSV payload is written into
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// File name prefix, followed by `_<YYYY-MM-DD_HH-MM-SS>.csv`
    #[serde(default = "default_filename_prefix")]
    pub filename_prefix: String,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.output_dir.trim().is_empty() {
            return Err("export.output_dir cannot be empty".to_string());
        }
        if self.filename_prefix.trim().is_empty() {
            return Err("export.filename_prefix cannot be empty".to_string());
        }
        if self
            .filename_prefix
            .chars()
            .any(|c| matches!(c, '/' | '\\' | '"') || c.is_control())
        {
            return Err(format!(
                "export.filename_prefix '{}' contains characters not allowed in a file name",
                self.filename_prefix
            ));
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            filename_prefix: default_filename_prefix(),
        }
    }
}

/// Access guard configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Anti-forgery token every export/unset request must present
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub action_token: Option<SecretString>,

    /// Capabilities granted to the operator running the CLI
    #[serde(default = "default_operator_capabilities")]
    pub operator_capabilities: Vec<String>,
}

impl SecurityConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        match &self.action_token {
            None => Err("security.action_token is required".to_string()),
            Some(token) if token.expose_secret().is_empty() => {
                Err("security.action_token cannot be empty".to_string())
            }
            Some(_) => Ok(()),
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            action_token: None,
            operator_capabilities: default_operator_capabilities(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_filename_prefix() -> String {
    "wc_order_export".to_string()
}

fn default_operator_capabilities() -> Vec<String> {
    vec!["manage_store".to_string()]
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
