//! Output module for exporting hashtag analytics
//!
//! This module handles:
//! - The merged per-tag record and its flat tabular form
//! - Writing record sets as JSON, CSV, HTML and Excel files
//! - Summarizing a run for the console

mod csv_output;
mod html;
mod json;
mod record;
pub mod stats;
mod traits;
mod xlsx;

pub use csv_output::CsvExporter;
pub use html::{format_html_table, HtmlExporter};
pub use json::JsonExporter;
pub use record::{FlatTable, HashtagRecord};
pub use stats::{print_summary, RunSummary};
pub use traits::{Exporter, OutputError, OutputResult};
pub use xlsx::{build_workbook, XlsxExporter};

use crate::config::OutputFormat;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Returns the exporter for a format
pub fn exporter_for(format: OutputFormat) -> Box<dyn Exporter> {
    match format {
        OutputFormat::Json => Box::new(JsonExporter),
        OutputFormat::Csv => Box::new(CsvExporter),
        OutputFormat::Html => Box::new(HtmlExporter),
        OutputFormat::Xlsx => Box::new(XlsxExporter),
    }
}

/// Writes record sets into an output directory
#[derive(Debug, Clone)]
pub struct DataExporter {
    output_dir: PathBuf,
}

impl DataExporter {
    /// Creates the exporter, creating `output_dir` if needed
    pub fn new(output_dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(output_dir)?;
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writes `records` with one exporter
    ///
    /// # Returns
    ///
    /// * `Ok(PathBuf)` - The target path (nothing is written for an empty
    ///   record set unless the exporter `writes_empty`)
    /// * `Err(OutputError)` - Failed to write the file
    pub fn export_with(
        &self,
        exporter: &dyn Exporter,
        records: &[HashtagRecord],
    ) -> OutputResult<PathBuf> {
        let path = self.output_dir.join(exporter.file_name());

        if records.is_empty() && !exporter.writes_empty() {
            tracing::warn!("No records provided to {} export.", exporter.format());
            return Ok(path);
        }

        let mut writer = BufWriter::new(File::create(&path)?);
        exporter.write(records, &mut writer)?;
        writer.flush()?;

        tracing::info!(
            "Wrote {} output to {}",
            exporter.format().to_string().to_uppercase(),
            path.display()
        );
        Ok(path)
    }

    /// Writes `records` in every requested format
    pub fn export(
        &self,
        records: &[HashtagRecord],
        formats: &[OutputFormat],
    ) -> OutputResult<Vec<PathBuf>> {
        formats
            .iter()
            .map(|format| self.export_with(exporter_for(*format).as_ref(), records))
            .collect()
    }
}
