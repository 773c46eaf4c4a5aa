//! In-memory tabular view of records
//!
//! Both tabular sinks (CSV and SQLite) write a [`Table`]; reading their output
//! back yields a `Table` as well.

use crate::record::Record;
use std::collections::{HashMap, HashSet};

/// Column holding the record title
pub const TITLE_COLUMN: &str = "title";

/// Column holding the record URL
pub const URL_COLUMN: &str = "url";

/// Rows of string cells under a fixed header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates a table; every row must have one cell per column
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        debug_assert!(rows.iter().all(|row| row.len() == columns.len()));
        Self { columns, rows }
    }

    /// Flattens records into `title, url, content_1 .. content_n`
    ///
    /// `n` is the largest fragment count; records with fewer fragments get
    /// empty cells. Table-row records name their cells after the table
    /// header instead, and rows sharing a header share the column. A name
    /// repeated within one record gets a `_2`, `_3`, ... suffix.
    pub fn from_records(records: &[Record]) -> Self {
        let mut columns = vec![TITLE_COLUMN.to_string(), URL_COLUMN.to_string()];
        let mut positions: HashMap<String, usize> = columns
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();

        let placements: Vec<Vec<usize>> = records
            .iter()
            .map(|record| {
                fragment_names(record)
                    .into_iter()
                    .map(|name| {
                        *positions.entry(name.clone()).or_insert_with(|| {
                            columns.push(name);
                            columns.len() - 1
                        })
                    })
                    .collect()
            })
            .collect();

        let rows = records
            .iter()
            .zip(&placements)
            .map(|(record, placement)| {
                let mut row = vec![String::new(); columns.len()];
                row[0] = record.title.clone();
                row[1] = record.url.clone();
                for (fragment, &column) in record.fragments.iter().zip(placement) {
                    row[column] = fragment.clone();
                }
                row
            })
            .collect();

        Self { columns, rows }
    }

    /// Index of a column by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All cells of one column, in row order
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row[index].as_str()).collect())
    }

    /// `(title, url)` of every row, in row order
    pub fn titles_and_urls(&self) -> Option<Vec<(String, String)>> {
        let title = self.column_index(TITLE_COLUMN)?;
        let url = self.column_index(URL_COLUMN)?;
        Some(
            self.rows
                .iter()
                .map(|row| (row[title].clone(), row[url].clone()))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Column name of every fragment of `record`, unique within the record
fn fragment_names(record: &Record) -> Vec<String> {
    let mut used: HashSet<String> = [TITLE_COLUMN, URL_COLUMN]
        .iter()
        .map(|name| name.to_string())
        .collect();

    (0..record.fragments.len())
        .map(|i| {
            let base = match record.header(i) {
                Some(name) => name.to_string(),
                None => format!("content_{}", i + 1),
            };
            let mut name = base.clone();
            let mut n = 2;
            while used.contains(&name) {
                name = format!("{}_{}", base, n);
                n += 1;
            }
            used.insert(name.clone());
            name
        })
        .collect()
}
