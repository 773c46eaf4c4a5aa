//! SQLite sink implementation
//!
//! This module provides a sink that stores records as one table in a SQLite
//! database, replacing the table on every write.

use crate::output::traits::{Sink, SinkResult};
use crate::record::Record;
use crate::storage::{SqliteStorage, Table, TableStore};
use std::path::Path;

/// SQLite table sink
pub struct SqliteSink {
    table_name: String,
}

impl SqliteSink {
    /// Creates a new SQLite sink
    ///
    /// # Arguments
    ///
    /// * `table_name` - Table the records are written to
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

impl Sink for SqliteSink {
    fn write(&self, records: &[Record], path: &Path) -> SinkResult<()> {
        let table = Table::from_records(records);

        let mut storage = SqliteStorage::new(path)?;
        let written = storage.replace_table(&self.table_name, &table)?;

        tracing::debug!(
            "Replaced table {} in {} with {} rows",
            self.table_name,
            path.display(),
            written
        );
        Ok(())
    }
}
