//! Storage module for tabular crawl output
//!
//! This module handles the database side of the tabular sinks:
//! - Flattening records into a [`Table`]
//! - Inferring SQL column types from cell values
//! - Replacing and reading back tables in SQLite

mod schema;
mod sqlite;
mod table;
mod traits;

pub use schema::{create_table_sql, ColumnType, DEFAULT_VARCHAR_LENGTH};
pub use sqlite::SqliteStorage;
pub use table::{Table, TITLE_COLUMN, URL_COLUMN};
pub use traits::{StorageError, StorageResult, TableStore};
