//! Subscriber setup
//!
//! Human-readable events go to stderr, which keeps a CSV streamed to stdout
//! intact. With `logging.local_enabled` each event is also written as one
//! JSON line to a rolling file in `logging.local_path`.

use crate::config::LoggingConfig;
use crate::domain::{ExporterError, Result};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Log file name inside `logging.local_path`
pub const LOG_FILE_NAME: &str = "order-exporter.log";

/// Flushes the file writer when dropped; hold it until exit
pub struct LoggingGuard {
    file_guard: Option<WorkerGuard>,
}

impl LoggingGuard {
    fn new(file_guard: Option<WorkerGuard>) -> Self {
        Self { file_guard }
    }

    /// Whether a file layer is attached
    pub fn has_file_output(&self) -> bool {
        self.file_guard.is_some()
    }
}

/// Install the global subscriber
///
/// `RUST_LOG` wins when set. Otherwise only `order_exporter` events at
/// `level` or above pass.
///
/// # Errors
///
/// Returns a configuration error for an unknown level, a log directory that
/// cannot be created, or a subscriber that is already installed.
///
/// # Example
///
/// ```no_run
/// use order_exporter::config::LoggingConfig;
/// use order_exporter::logging::init_logging;
///
/// let _guard = init_logging("info", &LoggingConfig::default())
///     .expect("Failed to initialize logging");
/// ```
pub fn init_logging(level: &str, config: &LoggingConfig) -> Result<LoggingGuard> {
    let level = parse_log_level(level)?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("order_exporter={level}")));

    let file = if config.local_enabled {
        std::fs::create_dir_all(&config.local_path).map_err(|e| {
            ExporterError::Configuration(format!(
                "Failed to create log directory {}: {e}",
                config.local_path
            ))
        })?;
        let appender = RollingFileAppender::new(
            parse_rotation(&config.local_rotation),
            &config.local_path,
            LOG_FILE_NAME,
        );
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = fmt::layer()
            .json()
            .with_current_span(false)
            .with_writer(writer);
        Some((layer, guard))
    } else {
        None
    };
    let (file_layer, file_guard) = file.unzip();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .map_err(|e| ExporterError::Configuration(format!("Failed to install logger: {e}")))?;

    tracing::debug!(
        %level,
        file = config.local_enabled,
        path = %config.local_path,
        "Logging initialized"
    );

    Ok(LoggingGuard::new(file_guard))
}

/// Parse a `trace`..`error` level name, case-insensitively
///
/// # Errors
///
/// Returns a configuration error naming the accepted levels
pub fn parse_log_level(name: &str) -> Result<Level> {
    name.parse::<Level>().map_err(|_| {
        ExporterError::Configuration(format!(
            "Invalid log level: {name}. Must be one of: trace, debug, info, warn, error"
        ))
    })
}

/// `hourly` and `never` are honoured; anything else rotates daily
fn parse_rotation(rotation: &str) -> Rotation {
    match rotation {
        "hourly" => Rotation::HOURLY,
        "never" => Rotation::NEVER,
        _ => Rotation::DAILY,
    }
}
