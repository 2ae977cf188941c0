//! Integration tests for logging functionality
//!
//! The global subscriber can only be installed once per process, so a
//! single test here initializes it.

use order_exporter::config::LoggingConfig;
use order_exporter::logging::init_logging;
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_path, "./logs");
    assert_eq!(config.local_rotation, "daily");
}

#[test]
fn test_file_logging_writes_json_lines() {
    std::env::remove_var("RUST_LOG");
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
    };

    let guard = init_logging("info", &config).unwrap();
    assert!(guard.has_file_output());
    assert!(log_path.exists());

    // The default filter only admits this crate's targets
    tracing::info!(
        target: "order_exporter::core::export",
        order_id = "1042",
        "Order exported and marked"
    );
    drop(guard);

    let contents =
        std::fs::read_to_string(log_path.join(order_exporter::logging::structured::LOG_FILE_NAME))
            .unwrap();
    let line = contents
        .lines()
        .find(|l| l.contains("Order exported and marked"))
        .unwrap();
    let event: serde_json::Value = serde_json::from_str(line).unwrap();
    assert_eq!(event["fields"]["order_id"], "1042");

    // A second subscriber cannot be installed
    assert!(init_logging("info", &LoggingConfig::default()).is_err());
}
