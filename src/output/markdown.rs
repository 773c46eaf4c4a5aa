//! Markdown document sink
//!
//! This module renders records as a human-readable markdown document, one
//! section per record separated by horizontal rules.

use crate::output::traits::{Sink, SinkResult};
use crate::record::{ContentMode, Record};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes records as a single Markdown document
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownDocumentSink;

impl Sink for MarkdownDocumentSink {
    fn write(&self, records: &[Record], path: &Path) -> SinkResult<()> {
        let markdown = format_markdown_document(records);

        let mut file = File::create(path)?;
        file.write_all(markdown.as_bytes())?;

        tracing::debug!("Wrote {} records to {}", records.len(), path.display());
        Ok(())
    }
}

/// Formats records as markdown
///
/// # Arguments
///
/// * `records` - Records in discovery order
///
/// # Returns
///
/// A formatted markdown string
pub fn format_markdown_document(records: &[Record]) -> String {
    let mut md = String::new();

    for record in records {
        md.push_str(&format!("# {}\n\n", single_line(&record.title)));
        md.push_str(&format!("[Original Post URL](<{}>)\n\n", record.url));

        for (index, fragment) in record.fragments.iter().enumerate() {
            // Markdown passes block-level HTML through untouched
            match record.content_mode {
                ContentMode::Html => md.push_str(fragment.trim()),
                ContentMode::Text => md.push_str(&single_line(fragment)),
                ContentMode::Table => match record.header(index) {
                    Some(header) => md.push_str(&format!(
                        "**{}**: {}",
                        single_line(header),
                        single_line(fragment)
                    )),
                    None => md.push_str(&single_line(fragment)),
                },
            }
            md.push_str("\n\n");
        }

        md.push_str("---\n\n");
    }

    md
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
