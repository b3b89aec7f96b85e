//! JSON export

use crate::config::OutputFormat;
use crate::output::traits::{Exporter, OutputResult};
use crate::output::HashtagRecord;
use std::io::Write;

/// Pretty-printed array of records
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter;

impl Exporter for JsonExporter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Json
    }

    fn file_name(&self) -> &'static str {
        "hashtags.json"
    }

    fn writes_empty(&self) -> bool {
        true
    }

    fn write(&self, records: &[HashtagRecord], writer: &mut dyn Write) -> OutputResult<()> {
        serde_json::to_writer_pretty(&mut *writer, records)?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}
