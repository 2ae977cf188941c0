//! CSV payload
//!
//! The export result as a downloadable file: a name, the encoded bytes and
//! the two header values a download response needs.

use crate::core::export::row::{header, ExportRow};
use crate::domain::{ExporterError, Result};
use chrono::{DateTime, Utc};

/// Default file name prefix
pub const DEFAULT_FILENAME_PREFIX: &str = "wc_order_export";

/// Timestamp part of the file name
pub const FILENAME_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// MIME type of the payload
pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// `<prefix>_<YYYY-MM-DD_HH-MM-SS>.csv`
pub fn export_file_name(prefix: &str, at: DateTime<Utc>) -> String {
    format!("{prefix}_{}.csv", at.format(FILENAME_TIMESTAMP_FORMAT))
}

/// Encoded CSV file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvPayload {
    file_name: String,
    body: Vec<u8>,
    row_count: usize,
}

impl CsvPayload {
    /// Encode a header row and the data rows
    ///
    /// Fields are quoted only when they contain a delimiter, a quote or a
    /// line break. Records end with `\n`.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if a record cannot be written
    pub fn render(
        file_name: impl Into<String>,
        custom_field_names: &[String],
        rows: &[ExportRow],
    ) -> Result<Self> {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer.write_record(header(custom_field_names))?;
        for row in rows {
            writer.write_record(row.record())?;
        }

        let body = writer
            .into_inner()
            .map_err(|e| ExporterError::Serialization(format!("CSV error: {}", e.error())))?;

        Ok(Self {
            file_name: file_name.into(),
            body,
            row_count: rows.len(),
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Encoded UTF-8 bytes
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Number of data rows (the header is not counted)
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn content_type(&self) -> &'static str {
        CSV_CONTENT_TYPE
    }

    /// `Content-Disposition` value for serving the payload as a download
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.file_name)
    }
}
