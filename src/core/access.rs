//! Access guard for the two admin actions
//!
//! Both `export` and `unset` require a valid anti-forgery token and the
//! `manage_store` capability. The guard runs before any store access, so a
//! rejected request leaves every order untouched.

use crate::config::schema::SecurityConfig;
use crate::config::SecretString;
use crate::domain::{ExporterError, Result};
use secrecy::ExposeSecret;
use std::fmt;

/// Capability required by every admin action
pub const MANAGE_STORE: &str = "manage_store";

/// Admin actions protected by the guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAction {
    /// Export completed orders to CSV and mark them
    ExportOrders,
    /// Remove the marker from every completed order
    UnsetExportedFlag,
}

impl AdminAction {
    /// Action name, as the shop's admin endpoint registers it
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminAction::ExportOrders => "wc_order_exporter_export_orders",
            AdminAction::UnsetExportedFlag => "wc_order_exporter_unset_exported_flag",
        }
    }

    pub fn required_capability(&self) -> &'static str {
        MANAGE_STORE
    }
}

impl fmt::Display for AdminAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Credentials presented with one admin request
#[derive(Debug, Clone, Default)]
pub struct AccessRequest {
    token: Option<SecretString>,
    capabilities: Vec<String>,
}

impl AccessRequest {
    /// Request presenting `token` (if any) on behalf of an operator
    /// holding `capabilities`
    pub fn new(token: Option<SecretString>, capabilities: Vec<String>) -> Self {
        Self {
            token,
            capabilities,
        }
    }

    fn has_capability(&self, capability: &str) -> bool {
        self.capabilities.iter().any(|c| c == capability)
    }
}

/// Checks admin requests against the configured action token
pub struct AccessGuard {
    expected_token: SecretString,
}

impl AccessGuard {
    pub fn new(expected_token: SecretString) -> Self {
        Self { expected_token }
    }

    /// Build the guard from the `[security]` section
    ///
    /// # Errors
    ///
    /// Returns a configuration error when no non-empty token is configured
    pub fn from_config(config: &SecurityConfig) -> Result<Self> {
        match &config.action_token {
            Some(token) if !token.expose_secret().is_empty() => Ok(Self::new(token.clone())),
            _ => Err(ExporterError::Configuration(
                "security.action_token must be set to run admin actions".to_string(),
            )),
        }
    }

    /// Authorize one admin request
    ///
    /// The token is checked first, then the capability.
    ///
    /// # Errors
    ///
    /// Returns [`ExporterError::Authentication`] for a missing or wrong
    /// token and [`ExporterError::Authorization`] when the capability is
    /// missing.
    pub fn authorize(&self, action: AdminAction, request: &AccessRequest) -> Result<()> {
        let expected = self.expected_token.expose_secret();
        let token_ok = request
            .token
            .as_ref()
            .is_some_and(|t| expected.matches(t.expose_secret().as_ref()));

        if !token_ok {
            tracing::warn!(action = %action, "Rejected admin request: invalid token");
            return Err(ExporterError::Authentication(format!(
                "invalid or missing token for {action}"
            )));
        }

        let capability = action.required_capability();
        if !request.has_capability(capability) {
            tracing::warn!(
                action = %action,
                capability,
                "Rejected admin request: missing capability"
            );
            return Err(ExporterError::Authorization(format!(
                "{action} requires the '{capability}' capability"
            )));
        }

        tracing::debug!(action = %action, "Admin request authorized");
        Ok(())
    }
}
