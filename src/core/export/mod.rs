//! Order export
//!
//! This module provides the export half of the exporter:
//! - Row projection of orders onto fixed and custom columns
//! - CSV payload encoding and file naming
//! - The export engine that selects, projects and marks orders
//! - Summary and reporting

pub mod engine;
pub mod payload;
pub mod row;
pub mod summary;

pub use engine::{ExportOutcome, OrderExportEngine, MARKER_VALUE};
pub use payload::{export_file_name, CsvPayload, CSV_CONTENT_TYPE, DEFAULT_FILENAME_PREFIX};
pub use row::{ExportRow, FIXED_COLUMNS};
pub use summary::ExportSummary;
