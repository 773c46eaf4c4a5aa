//! Sink traits and types
//!
//! This module defines the trait interface for record sinks, the output
//! formats they implement, and the associated error types.

use crate::record::Record;
use crate::storage::StorageError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while writing records
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Failed to format output: {0}")]
    Format(String),
}

/// Result type for sink operations
pub type SinkResult<T> = Result<T, SinkError>;

/// Output formats supported by the sinks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Single HTML document
    Html,
    /// Single Markdown document
    Markdown,
    /// CSV file, one row per record
    Csv,
    /// SQLite database table, one row per record
    Sqlite,
}

impl OutputFormat {
    /// Guesses the format from a file extension
    ///
    /// # Example
    ///
    /// ```
    /// use folio_crawl::OutputFormat;
    /// use std::path::Path;
    ///
    /// assert_eq!(OutputFormat::from_path(Path::new("posts.csv")), Some(OutputFormat::Csv));
    /// assert_eq!(OutputFormat::from_path(Path::new("posts")), None);
    /// ```
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "html" | "htm" => Some(Self::Html),
            "md" | "markdown" => Some(Self::Markdown),
            "csv" => Some(Self::Csv),
            "db" | "sqlite" | "sqlite3" => Some(Self::Sqlite),
            _ => None,
        }
    }

    /// Whether the format stores one row per record
    pub fn is_tabular(&self) -> bool {
        matches!(self, Self::Csv | Self::Sqlite)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Html => "html",
            Self::Markdown => "markdown",
            Self::Csv => "csv",
            Self::Sqlite => "sqlite",
        };
        write!(f, "{}", name)
    }
}

/// Trait for record sinks
///
/// A sink is a stateless transformation of the ordered record sequence into
/// a file. Writing never modifies the records.
pub trait Sink {
    /// Writes all records to `path`, replacing previous output
    ///
    /// # Arguments
    ///
    /// * `records` - Records in discovery order
    /// * `path` - Destination file
    fn write(&self, records: &[Record], path: &Path) -> SinkResult<()>;
}
