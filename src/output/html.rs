//! HTML document sink
//!
//! Renders every record into one HTML document: a heading with the title, a
//! link back to the item page, the content fragments, and a rule between
//! records.

use crate::output::traits::{Sink, SinkResult};
use crate::record::{ContentMode, Record};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes records as a single HTML document
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlDocumentSink;

impl Sink for HtmlDocumentSink {
    fn write(&self, records: &[Record], path: &Path) -> SinkResult<()> {
        let html = format_html_document(records);

        let mut file = File::create(path)?;
        file.write_all(html.as_bytes())?;

        tracing::debug!("Wrote {} records to {}", records.len(), path.display());
        Ok(())
    }
}

/// Formats records as an HTML document
///
/// HTML fragments are embedded as-is; text fragments are escaped and wrapped
/// in paragraphs. Table cells are prefixed with their column header.
pub fn format_html_document(records: &[Record]) -> String {
    let mut html = String::from("<html><body>\n");

    for record in records {
        html.push_str(&format!("<h1>{}</h1>\n", escape_html(&record.title)));
        html.push_str(&format!(
            "<p><a href=\"{}\">Original Post URL</a></p>\n",
            escape_html(&record.url)
        ));

        for (index, fragment) in record.fragments.iter().enumerate() {
            match record.content_mode {
                ContentMode::Html => html.push_str(fragment),
                ContentMode::Text => html.push_str(&format!("<p>{}</p>", escape_html(fragment))),
                ContentMode::Table => match record.header(index) {
                    Some(header) => html.push_str(&format!(
                        "<p><b>{}</b>: {}</p>",
                        escape_html(header),
                        escape_html(fragment)
                    )),
                    None => html.push_str(&format!("<p>{}</p>", escape_html(fragment))),
                },
            }
            html.push('\n');
        }

        html.push_str("<hr>\n");
    }

    html.push_str("</body></html>\n");
    html
}

/// Escapes text for use in element content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
