//! Extracted content records
//!
//! A [`Record`] is the unit handed from the crawler to the sinks. Records are
//! built once from an item page and never modified afterwards.

use serde::{Deserialize, Serialize};

/// How content fragments are captured from the item page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentMode {
    /// Outer HTML of the matched element, images and formatting included
    Html,
    /// Whitespace-trimmed text content
    Text,
    /// One record per data row of the first matched table, cells as text
    Table,
}

/// One extracted content item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    /// Title of the item
    pub title: String,

    /// Content fragments, either outer HTML or plain text
    pub fragments: Vec<String>,

    /// URL of the item page the record was extracted from
    pub url: String,

    /// What the fragments contain
    pub content_mode: ContentMode,

    /// Column names for the fragments of a table row; empty otherwise
    pub headers: Vec<String>,
}

impl Record {
    /// Creates a new record
    pub fn new(
        title: impl Into<String>,
        fragments: Vec<String>,
        url: impl Into<String>,
        content_mode: ContentMode,
    ) -> Self {
        Self {
            title: title.into(),
            fragments,
            url: url.into(),
            content_mode,
            headers: Vec::new(),
        }
    }

    /// Creates a record from one table row
    ///
    /// `headers[i]` names `cells[i]`; cells past the end of `headers` are
    /// unnamed.
    pub fn table_row(
        title: impl Into<String>,
        headers: Vec<String>,
        cells: Vec<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            headers,
            ..Self::new(title, cells, url, ContentMode::Table)
        }
    }

    /// Name of the fragment at `index`, if the record carries one
    pub fn header(&self, index: usize) -> Option<&str> {
        self.headers
            .get(index)
            .map(String::as_str)
            .filter(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_row_headers() {
        let record = Record::table_row(
            "Arsenal",
            vec!["Player".to_string(), "".to_string()],
            vec!["Saka".to_string(), "ENG".to_string(), "21".to_string()],
            "https://example.com/squads/arsenal",
        );
        assert_eq!(record.content_mode, ContentMode::Table);
        assert_eq!(record.header(0), Some("Player"));
        assert_eq!(record.header(1), None);
        assert_eq!(record.header(2), None);
    }
}
