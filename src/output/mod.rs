//! Output module for writing crawl results
//!
//! This module handles:
//! - Document sinks (HTML, Markdown) rendering every record into one file
//! - Tabular sinks (CSV, SQLite) storing one row per record
//! - Crawl statistics

mod csv_output;
mod html;
mod markdown;
mod sqlite_output;
pub mod stats;
mod traits;

pub use csv_output::{read_csv_table, CsvSink};
pub use html::{escape_html, format_html_document, HtmlDocumentSink};
pub use markdown::{format_markdown_document, MarkdownDocumentSink};
pub use sqlite_output::SqliteSink;
pub use stats::{print_statistics, CrawlStatistics};
pub use traits::{OutputFormat, Sink, SinkError, SinkResult};

use crate::config::OutputConfig;
use crate::record::Record;
use crate::FolioError;
use std::path::Path;

/// Returns the sink implementing `format`
///
/// # Arguments
///
/// * `format` - Output format to produce
/// * `output` - Output settings (the SQLite sink takes its table name from here)
pub fn sink_for(format: OutputFormat, output: &OutputConfig) -> Box<dyn Sink> {
    match format {
        OutputFormat::Html => Box::new(HtmlDocumentSink),
        OutputFormat::Markdown => Box::new(MarkdownDocumentSink),
        OutputFormat::Csv => Box::new(CsvSink),
        OutputFormat::Sqlite => Box::new(SqliteSink::new(output.table_name.clone())),
    }
}

/// Writes records using the configured output settings
///
/// # Returns
///
/// * `Ok(OutputFormat)` - The format that was written
/// * `Err(FolioError)` - No format could be determined, or the sink failed
pub fn write_records(records: &[Record], output: &OutputConfig) -> Result<OutputFormat, FolioError> {
    let format = output.effective_format().ok_or_else(|| {
        SinkError::Format(format!(
            "cannot determine output format for '{}'; pass --format",
            output.path
        ))
    })?;

    tracing::info!(
        "Writing {} records to {} ({})",
        records.len(),
        output.path,
        format
    );
    sink_for(format, output).write(records, Path::new(&output.path))?;

    Ok(format)
}
