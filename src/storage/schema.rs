//! Column type inference and DDL generation
//!
//! Column types are inferred from observed values:
//! - every non-empty value is a whole number → `INTEGER`
//! - every non-empty value is a number → `FLOAT`
//! - otherwise → `VARCHAR(n)`, `n` being the longest value
//!
//! A value only counts as a number when the stored number prints back as the
//! same text (`"007"` and `"1.50"` stay text). Empty cells are stored as NULL
//! and do not take part in inference. A column with no values at all becomes
//! `VARCHAR(255)`.

use rusqlite::types::Value;

/// Width used for text columns that hold no values
pub const DEFAULT_VARCHAR_LENGTH: usize = 255;

/// SQL type of one column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Float,
    Varchar(usize),
}

impl ColumnType {
    /// Infers the type of a column from its cells
    pub fn infer<'a>(values: impl IntoIterator<Item = &'a str>) -> Self {
        let mut all_integer = true;
        let mut all_float = true;
        let mut max_length = 0;
        let mut seen = false;

        for value in values.into_iter().filter(|v| !v.is_empty()) {
            seen = true;
            max_length = max_length.max(value.chars().count());
            if all_integer && !is_exact_integer(value) {
                all_integer = false;
            }
            if all_float && !is_exact_float(value) {
                all_float = false;
            }
        }

        if !seen {
            ColumnType::Varchar(DEFAULT_VARCHAR_LENGTH)
        } else if all_integer {
            ColumnType::Integer
        } else if all_float {
            ColumnType::Float
        } else {
            ColumnType::Varchar(max_length)
        }
    }

    /// Text type wide enough for every cell, regardless of content
    pub fn text<'a>(values: impl IntoIterator<Item = &'a str>) -> Self {
        let longest = values.into_iter().map(|v| v.chars().count()).max().unwrap_or(0);
        if longest == 0 {
            ColumnType::Varchar(DEFAULT_VARCHAR_LENGTH)
        } else {
            ColumnType::Varchar(longest)
        }
    }

    /// Type name used in `CREATE TABLE`
    pub fn to_sql(&self) -> String {
        match self {
            ColumnType::Integer => "INTEGER".to_string(),
            ColumnType::Float => "FLOAT".to_string(),
            ColumnType::Varchar(length) => format!("VARCHAR({})", length),
        }
    }

    /// Converts a cell to the value bound for this column
    pub fn to_value(&self, cell: &str) -> Value {
        if cell.is_empty() {
            return Value::Null;
        }
        match self {
            ColumnType::Integer => cell
                .parse::<i64>()
                .map(Value::Integer)
                .unwrap_or_else(|_| Value::Text(cell.to_string())),
            ColumnType::Float => cell
                .parse::<f64>()
                .map(Value::Real)
                .unwrap_or_else(|_| Value::Text(cell.to_string())),
            ColumnType::Varchar(_) => Value::Text(cell.to_string()),
        }
    }
}

fn is_exact_integer(value: &str) -> bool {
    value
        .parse::<i64>()
        .map(|i| i.to_string() == value)
        .unwrap_or(false)
}

fn is_exact_float(value: &str) -> bool {
    value
        .parse::<f64>()
        .map(|f| f.is_finite() && f.to_string() == value)
        .unwrap_or(false)
}

/// Quotes an SQL identifier
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Builds the `CREATE TABLE` statement for a table
pub fn create_table_sql(table: &str, columns: &[(String, ColumnType)]) -> String {
    let definitions = columns
        .iter()
        .map(|(name, column_type)| format!("{} {}", quote_identifier(name), column_type.to_sql()))
        .collect::<Vec<_>>()
        .join(", ");

    format!("CREATE TABLE {} ({})", quote_identifier(table), definitions)
}
