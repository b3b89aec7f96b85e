//! Excel workbook export
//!
//! Same flat rows as the CSV export, written to a single worksheet with a
//! bold header row.

use crate::config::OutputFormat;
use crate::output::traits::{Exporter, OutputResult};
use crate::output::{FlatTable, HashtagRecord};
use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook};
use std::io::Write;

/// Name of the only worksheet in the workbook
pub const SHEET_NAME: &str = "Hashtags";

#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxExporter;

impl Exporter for XlsxExporter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Xlsx
    }

    fn file_name(&self) -> &'static str {
        "hashtags.xlsx"
    }

    fn write(&self, records: &[HashtagRecord], writer: &mut dyn Write) -> OutputResult<()> {
        let bytes = build_workbook(&FlatTable::from_records(records)?)?;
        writer.write_all(&bytes)?;
        Ok(())
    }
}

/// Serializes the table into xlsx bytes
pub fn build_workbook(table: &FlatTable) -> OutputResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, column) in (0 as ColNum..).zip(&table.columns) {
        sheet.write_string_with_format(0, col, column, &header)?;
    }
    for (row_idx, row) in (1 as RowNum..).zip(&table.rows) {
        for (col, cell) in (0 as ColNum..).zip(table.cells(row)) {
            sheet.write_string(row_idx, col, cell)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}
