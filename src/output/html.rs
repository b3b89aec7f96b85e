//! HTML table export

use crate::config::OutputFormat;
use crate::output::traits::{Exporter, OutputResult};
use crate::output::{FlatTable, HashtagRecord};
use maud::{html, Markup, DOCTYPE};
use std::io::Write;

/// Standalone HTML document with one table row per record
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlExporter;

impl Exporter for HtmlExporter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Html
    }

    fn file_name(&self) -> &'static str {
        "hashtags.html"
    }

    fn write(&self, records: &[HashtagRecord], writer: &mut dyn Write) -> OutputResult<()> {
        let page = format_html_table(records)?;
        writer.write_all(page.into_string().as_bytes())?;
        Ok(())
    }
}

/// Renders the records as a complete HTML document
pub fn format_html_table(records: &[HashtagRecord]) -> OutputResult<Markup> {
    let flat = FlatTable::from_records(records)?;

    Ok(html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { "Hashtag Analytics" }
            }
            body {
                table class="hashtag-table" {
                    thead {
                        tr {
                            @for column in &flat.columns {
                                th { (column) }
                            }
                        }
                    }
                    tbody {
                        @for row in &flat.rows {
                            tr {
                                @for cell in flat.cells(row) {
                                    td { (cell) }
                                }
                            }
                        }
                    }
                }
            }
        }
    })
}
