//! Storage traits and error types
//!
//! This module defines the trait interface for table storage backends and
//! associated error types.

use crate::storage::schema::ColumnType;
use crate::storage::table::Table;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Unknown column type '{declared}' for column {column}")]
    UnknownColumnType { column: String, declared: String },
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for table storage backends
pub trait TableStore {
    /// Replaces `name` with the contents of `table`
    ///
    /// Column types are inferred from the table's cells. Any existing table of
    /// the same name is dropped first.
    ///
    /// # Returns
    ///
    /// The number of rows written
    fn replace_table(&mut self, name: &str, table: &Table) -> StorageResult<usize>;

    /// Reads a whole table back, converting every cell to text
    fn read_table(&self, name: &str) -> StorageResult<Table>;

    /// Declared column types of a table, in column order
    fn column_types(&self, name: &str) -> StorageResult<Vec<(String, ColumnType)>>;

    /// Whether a table exists
    fn table_exists(&self, name: &str) -> StorageResult<bool>;
}
