//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod export;
pub mod init;
pub mod status;
pub mod unset;
pub mod validate;

use crate::config::{secret_string, ExporterConfig};
use crate::core::access::AccessRequest;
use crate::domain::ExporterError;

/// Success
pub const EXIT_OK: i32 = 0;
/// Configuration error
pub const EXIT_CONFIG: i32 = 2;
/// Token or capability check failed
pub const EXIT_ACCESS_DENIED: i32 = 3;
/// Store or export failure
pub const EXIT_FATAL: i32 = 5;

/// Exit code for an error returned by the engines or the store
pub fn exit_code_for(error: &ExporterError) -> i32 {
    match error {
        ExporterError::Configuration(_) => EXIT_CONFIG,
        e if e.is_access_denied() => EXIT_ACCESS_DENIED,
        _ => EXIT_FATAL,
    }
}

/// Request carrying the operator's token and configured capabilities
fn access_request(token: Option<&str>, config: &ExporterConfig) -> AccessRequest {
    AccessRequest::new(
        token.map(|t| secret_string(t.to_string())),
        config.security.operator_capabilities.clone(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StoreError;

    #[test]
    fn test_exit_code_mapping() {
        assert_eq!(
            exit_code_for(&ExporterError::Configuration("x".to_string())),
            EXIT_CONFIG
        );
        assert_eq!(
            exit_code_for(&ExporterError::Authentication("x".to_string())),
            EXIT_ACCESS_DENIED
        );
        assert_eq!(
            exit_code_for(&ExporterError::Authorization("x".to_string())),
            EXIT_ACCESS_DENIED
        );
        assert_eq!(
            exit_code_for(&StoreError::Unavailable("x".to_string()).into()),
            EXIT_FATAL
        );
    }
}
