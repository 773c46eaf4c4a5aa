//! CSV sink
//!
//! One row per record under the header `title,url,content_1..content_n`.

use crate::output::traits::{Sink, SinkResult};
use crate::record::Record;
use crate::storage::Table;
use std::path::Path;

/// Writes records as a CSV file
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvSink;

impl Sink for CsvSink {
    fn write(&self, records: &[Record], path: &Path) -> SinkResult<()> {
        let table = Table::from_records(records);

        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(&table.columns)?;
        for row in &table.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;

        tracing::debug!(
            "Wrote {} rows ({} columns) to {}",
            table.len(),
            table.columns.len(),
            path.display()
        );
        Ok(())
    }
}

/// Reads a CSV file written by [`CsvSink`] back into a table
pub fn read_csv_table(path: &Path) -> SinkResult<Table> {
    let mut reader = csv::Reader::from_path(path)?;

    let columns = reader
        .headers()?
        .iter()
        .map(str::to_string)
        .collect::<Vec<_>>();
    let rows = reader
        .records()
        .map(|row| row.map(|row| row.iter().map(str::to_string).collect()))
        .collect::<Result<Vec<Vec<String>>, _>>()?;

    Ok(Table::new(columns, rows))
}
