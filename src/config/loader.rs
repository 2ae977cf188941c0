//! Configuration file loading
//!
//! `order-exporter.toml` is read once per invocation. `${VAR}` references
//! outside comment lines are expanded before parsing, and
//! `ORDER_EXPORTER_<SECTION>_<KEY>` variables take precedence over the file.

use super::schema::{ExporterConfig, StoreBackend};
use super::secret::secret_string;
use crate::domain::errors::ExporterError;
use crate::domain::result::Result;
use regex::{Captures, Regex};
use std::fs;
use std::io;
use std::path::Path;

const ENV_PREFIX: &str = "ORDER_EXPORTER_";

/// Load, expand, override and validate a configuration file
///
/// # Errors
///
/// Returns [`ExporterError::Configuration`] when the file is missing or
/// unreadable, a referenced variable is unset, the TOML is malformed, or a
/// value fails validation.
///
/// # Examples
///
/// ```no_run
/// use order_exporter::config::loader::load_config;
///
/// let config = load_config("order-exporter.toml").expect("Failed to load config");
/// assert!(!config.store.path.is_empty());
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<ExporterConfig> {
    let path = path.as_ref();

    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(config_error(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }
        Err(e) => {
            return Err(config_error(format!("Cannot read {}: {e}", path.display())));
        }
    };

    let expanded = expand_env_refs(&raw)?;
    let mut config: ExporterConfig = toml::from_str(&expanded)
        .map_err(|e| config_error(format!("Invalid TOML in {}: {e}", path.display())))?;

    apply_env_overrides(&mut config);
    config
        .validate()
        .map_err(|e| config_error(format!("Invalid configuration: {e}")))?;

    Ok(config)
}

fn config_error(message: String) -> ExporterError {
    ExporterError::Configuration(message)
}

/// Replace `${VAR}` with the variable's value, line by line
///
/// Lines starting with `#` are kept verbatim. Every unset variable is
/// reported in a single error.
fn expand_env_refs(input: &str) -> Result<String> {
    let pattern = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| config_error(format!("Invalid substitution pattern: {e}")))?;
    let mut missing: Vec<String> = Vec::new();
    let mut out = String::with_capacity(input.len());

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            out.push_str(line);
        } else {
            let expanded = pattern.replace_all(line, |caps: &Captures| {
                std::env::var(&caps[1]).unwrap_or_else(|_| {
                    if !missing.iter().any(|name| name == &caps[1]) {
                        missing.push(caps[1].to_string());
                    }
                    caps[0].to_string()
                })
            });
            out.push_str(&expanded);
        }
        out.push('\n');
    }

    if missing.is_empty() {
        Ok(out)
    } else {
        Err(config_error(format!(
            "Missing required environment variables: {}",
            missing.join(", ")
        )))
    }
}

fn env_override(key: &str) -> Option<String> {
    std::env::var(format!("{ENV_PREFIX}{key}")).ok()
}

fn env_flag(key: &str) -> Option<bool> {
    env_override(key).map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
}

/// Apply `ORDER_EXPORTER_<SECTION>_<KEY>` variables over the parsed file
fn apply_env_overrides(config: &mut ExporterConfig) {
    if let Some(level) = env_override("APPLICATION_LOG_LEVEL") {
        config.application.log_level = level;
    }
    if let Some(dry_run) = env_flag("APPLICATION_DRY_RUN") {
        config.application.dry_run = dry_run;
    }

    if let Some(backend) = env_override("STORE_BACKEND") {
        match backend.as_str() {
            "json_file" => config.store.backend = StoreBackend::JsonFile,
            "memory" => config.store.backend = StoreBackend::Memory,
            other => tracing::warn!(backend = %other, "Ignoring unknown store backend override"),
        }
    }
    if let Some(path) = env_override("STORE_PATH") {
        config.store.path = path;
    }

    if let Some(dir) = env_override("EXPORT_OUTPUT_DIR") {
        config.export.output_dir = dir;
    }
    if let Some(prefix) = env_override("EXPORT_FILENAME_PREFIX") {
        config.export.filename_prefix = prefix;
    }

    if let Some(token) = env_override("SECURITY_ACTION_TOKEN") {
        config.security.action_token = Some(secret_string(token));
    }
    if let Some(caps) = env_override("SECURITY_OPERATOR_CAPABILITIES") {
        config.security.operator_capabilities = caps
            .split(',')
            .map(str::trim)
            .filter(|cap| !cap.is_empty())
            .map(str::to_string)
            .collect();
    }

    if let Some(enabled) = env_flag("LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = enabled;
    }
    if let Some(path) = env_override("LOGGING_LOCAL_PATH") {
        config.logging.local_path = path;
    }
    if let Some(rotation) = env_override("LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = rotation;
    }
}
