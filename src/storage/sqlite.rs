//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the TableStore trait.

use crate::storage::schema::{create_table_sql, quote_identifier, ColumnType};
use crate::storage::table::{Table, TITLE_COLUMN, URL_COLUMN};
use crate::storage::traits::{StorageError, StorageResult, TableStore};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection};
use std::path::Path;

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Creates a new SqliteStorage instance
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStorage)` - Successfully opened/created database
    /// * `Err(StorageError)` - Failed to open database
    pub fn new(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }
}

impl TableStore for SqliteStorage {
    fn replace_table(&mut self, name: &str, table: &Table) -> StorageResult<usize> {
        let column_types: Vec<(String, ColumnType)> = table
            .columns
            .iter()
            .enumerate()
            .map(|(index, column)| {
                let cells = table.rows.iter().map(|row| row[index].as_str());
                // Title and URL are read back verbatim
                let column_type = if column == TITLE_COLUMN || column == URL_COLUMN {
                    ColumnType::text(cells)
                } else {
                    ColumnType::infer(cells)
                };
                (column.clone(), column_type)
            })
            .collect();

        let tx = self.conn.transaction()?;
        tx.execute_batch(&format!("DROP TABLE IF EXISTS {};", quote_identifier(name)))?;
        tx.execute_batch(&create_table_sql(name, &column_types))?;

        {
            let placeholders = (1..=column_types.len())
                .map(|i| format!("?{}", i))
                .collect::<Vec<_>>()
                .join(", ");
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO {} VALUES ({})",
                quote_identifier(name),
                placeholders
            ))?;

            for row in &table.rows {
                let values = row
                    .iter()
                    .zip(&column_types)
                    .map(|(cell, (_, column_type))| column_type.to_value(cell));
                stmt.execute(params_from_iter(values))?;
            }
        }

        tx.commit()?;

        tracing::debug!(
            "Wrote {} rows to table {} ({} columns)",
            table.rows.len(),
            name,
            column_types.len()
        );

        Ok(table.rows.len())
    }

    fn read_table(&self, name: &str) -> StorageResult<Table> {
        if !self.table_exists(name)? {
            return Err(StorageError::TableNotFound(name.to_string()));
        }

        let mut stmt = self
            .conn
            .prepare(&format!("SELECT * FROM {} ORDER BY rowid", quote_identifier(name)))?;
        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        let column_count = columns.len();

        let rows = stmt
            .query_map([], |row| {
                (0..column_count)
                    .map(|i| row.get::<_, Value>(i).map(value_to_cell))
                    .collect::<Result<Vec<String>, _>>()
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Table::new(columns, rows))
    }

    fn column_types(&self, name: &str) -> StorageResult<Vec<(String, ColumnType)>> {
        if !self.table_exists(name)? {
            return Err(StorageError::TableNotFound(name.to_string()));
        }

        let mut stmt = self
            .conn
            .prepare(&format!("PRAGMA table_info({})", quote_identifier(name)))?;
        let declared = stmt
            .query_map([], |row| Ok((row.get::<_, String>(1)?, row.get::<_, String>(2)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        declared
            .into_iter()
            .map(|(column, declared)| {
                let column_type = parse_declared_type(&declared).ok_or_else(|| {
                    StorageError::UnknownColumnType {
                        column: column.clone(),
                        declared: declared.clone(),
                    }
                })?;
                Ok((column, column_type))
            })
            .collect()
    }

    fn table_exists(&self, name: &str) -> StorageResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            params![name],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}

/// Text form of a stored value; NULL reads back as an empty cell
fn value_to_cell(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Text(s) => s,
        Value::Blob(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
    }
}

/// Parses a declared type written by [`create_table_sql`]
fn parse_declared_type(declared: &str) -> Option<ColumnType> {
    let upper = declared.trim().to_ascii_uppercase();
    match upper.as_str() {
        "INTEGER" => Some(ColumnType::Integer),
        "FLOAT" => Some(ColumnType::Float),
        _ => upper
            .strip_prefix("VARCHAR(")
            .and_then(|rest| rest.strip_suffix(')'))
            .and_then(|length| length.trim().parse().ok())
            .map(ColumnType::Varchar),
    }
}
