//! Result type alias for the order exporter

use super::errors::ExporterError;

/// Result type alias for exporter operations
///
/// # Examples
///
/// ```
/// use order_exporter::domain::result::Result;
/// use order_exporter::domain::errors::ExporterError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(ExporterError::Export("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, ExporterError>;
