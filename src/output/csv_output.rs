//! CSV export
//!
//! One row per record; nested fields are JSON-encoded in their cell.

use crate::config::OutputFormat;
use crate::output::traits::{Exporter, OutputResult};
use crate::output::{FlatTable, HashtagRecord};
use std::io::Write;

#[derive(Debug, Clone, Copy, Default)]
pub struct CsvExporter;

impl Exporter for CsvExporter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Csv
    }

    fn file_name(&self) -> &'static str {
        "hashtags.csv"
    }

    fn write(&self, records: &[HashtagRecord], writer: &mut dyn Write) -> OutputResult<()> {
        let table = FlatTable::from_records(records)?;

        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(&table.columns)?;
        for row in &table.rows {
            wtr.write_record(table.cells(row))?;
        }
        wtr.flush()?;

        Ok(())
    }
}
