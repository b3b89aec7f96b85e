//! Exporter trait and output errors

use crate::config::OutputFormat;
use crate::output::HashtagRecord;
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to format output: {0}")]
    Format(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Excel error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// A file format the record set can be written in
pub trait Exporter {
    /// The format this exporter produces
    fn format(&self) -> OutputFormat;

    /// File name inside the output directory
    fn file_name(&self) -> &'static str;

    /// Whether a file is still written when there are no records
    fn writes_empty(&self) -> bool {
        false
    }

    /// Serializes all records into `writer`
    fn write(&self, records: &[HashtagRecord], writer: &mut dyn Write) -> OutputResult<()>;
}
