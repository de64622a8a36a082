//! SQLite sink.
//!
//! Each relation is replaced inside a single transaction covering the drop,
//! the create and every insert.

use std::path::Path;
use std::time::Duration;

use polars::prelude::{AnyValue, DataFrame, DataType};
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, params_from_iter};

use crate::sink::{Sink, SinkError};

/// Quote an SQL identifier, doubling embedded quotes.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn sql_type(column: &str, dtype: &DataType) -> Result<&'static str, SinkError> {
    if dtype.is_integer() || dtype.is_bool() {
        Ok("INTEGER")
    } else if dtype.is_float() {
        Ok("REAL")
    } else if dtype.is_string() || dtype.is_null() {
        Ok("TEXT")
    } else {
        Err(SinkError::UnsupportedType {
            column: column.to_string(),
            dtype: dtype.to_string(),
        })
    }
}

/// `CREATE TABLE` statement for a frame, typed by column dtype.
pub fn create_table_sql(relation: &str, data: &DataFrame) -> Result<String, SinkError> {
    let columns = data
        .get_columns()
        .iter()
        .map(|column| {
            let name = column.name().as_str();
            sql_type(name, column.dtype())
                .map(|ty| format!("{} {ty}", quote_identifier(name)))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(format!(
        "CREATE TABLE {} ({})",
        quote_identifier(relation),
        columns.join(", ")
    ))
}

pub fn insert_sql(relation: &str, data: &DataFrame) -> String {
    let names: Vec<String> = data
        .get_column_names()
        .iter()
        .map(|name| quote_identifier(name.as_str()))
        .collect();
    let placeholders: Vec<String> = (1..=names.len()).map(|idx| format!("?{idx}")).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_identifier(relation),
        names.join(", "),
        placeholders.join(", ")
    )
}

fn sql_value(value: AnyValue<'_>) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::Boolean(b) => Value::Integer(i64::from(b)),
        AnyValue::Int8(v) => Value::Integer(i64::from(v)),
        AnyValue::Int16(v) => Value::Integer(i64::from(v)),
        AnyValue::Int32(v) => Value::Integer(i64::from(v)),
        AnyValue::Int64(v) => Value::Integer(v),
        AnyValue::UInt8(v) => Value::Integer(i64::from(v)),
        AnyValue::UInt16(v) => Value::Integer(i64::from(v)),
        AnyValue::UInt32(v) => Value::Integer(i64::from(v)),
        AnyValue::UInt64(v) => match i64::try_from(v) {
            Ok(v) => Value::Integer(v),
            Err(_) => Value::Real(v as f64),
        },
        AnyValue::Float32(v) => Value::Real(f64::from(v)),
        AnyValue::Float64(v) => Value::Real(v),
        AnyValue::String(s) => Value::Text(s.to_string()),
        AnyValue::StringOwned(s) => Value::Text(s.to_string()),
        other => Value::Text(other.to_string()),
    }
}

#[derive(Debug)]
pub struct SqliteSink {
    conn: Connection,
}

impl SqliteSink {
    /// Open (or create) a database file, creating its parent directory.
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| SinkError::Open {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let conn = Connection::open(path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self, SinkError> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn relation_exists(&self, relation: &str) -> Result<bool, SinkError> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [relation],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    pub fn row_count(&self, relation: &str) -> Result<usize, SinkError> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", quote_identifier(relation)),
            [],
            |row| row.get(0),
        )?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    /// Column names of `relation` in declaration order.
    pub fn relation_columns(&self, relation: &str) -> Result<Vec<String>, SinkError> {
        let mut stmt = self
            .conn
            .prepare(&format!("PRAGMA table_info({})", quote_identifier(relation)))?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(1))?;
        let mut columns = Vec::new();
        for name in rows {
            columns.push(name?);
        }
        Ok(columns)
    }
}

impl Sink for SqliteSink {
    fn replace_relation(&mut self, relation: &str, data: &DataFrame) -> Result<usize, SinkError> {
        let create = create_table_sql(relation, data)?;
        let insert = insert_sql(relation, data);

        let tx = self.conn.transaction()?;
        tx.execute(&format!("DROP TABLE IF EXISTS {}", quote_identifier(relation)), [])?;
        tx.execute(&create, [])?;
        {
            let mut stmt = tx.prepare(&insert)?;
            let columns = data.get_columns();
            for idx in 0..data.height() {
                let mut values = Vec::with_capacity(columns.len());
                for column in columns {
                    values.push(sql_value(column.get(idx)?));
                }
                stmt.execute(params_from_iter(values))?;
            }
        }
        tx.commit()?;
        Ok(data.height())
    }

    fn drop_relation(&mut self, relation: &str) -> Result<(), SinkError> {
        self.conn.execute(
            &format!("DROP TABLE IF EXISTS {}", quote_identifier(relation)),
            [],
        )?;
        Ok(())
    }
}
