//! In-process DuckDB engine

use super::Engine;
use crate::error::Result;
use duckdb::types::Value;
use duckdb::Connection;
use std::path::Path;

/// DuckDB linked into the process
pub struct NativeEngine {
    conn: Connection,
}

impl NativeEngine {
    /// Open `database`, or an in-memory database when `None`
    pub fn open(database: Option<&Path>) -> Result<Self> {
        let conn = match database {
            Some(path) => Connection::open(path)?,
            None => Connection::open_in_memory()?,
        };
        Ok(Self { conn })
    }
}

impl Engine for NativeEngine {
    fn name(&self) -> &'static str {
        "native"
    }

    fn execute(&self, sql: &str) -> Result<()> {
        self.conn.execute_batch(sql)?;
        Ok(())
    }

    fn query(&self, sql: &str) -> Result<Vec<Vec<String>>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([])?;
        let column_count = rows.as_ref().map_or(0, duckdb::Statement::column_count);

        let mut result = Vec::new();
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(column_count);
            for i in 0..column_count {
                let value: Value = row.get(i)?;
                values.push(value_to_string(value).unwrap_or_default());
            }
            result.push(values);
        }

        Ok(result)
    }
}

/// Convert a DuckDB value to its display string, `None` for NULL
fn value_to_string(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Boolean(b) => Some(b.to_string()),
        Value::Text(s) => Some(s),
        Value::TinyInt(i) => Some(i.to_string()),
        Value::SmallInt(i) => Some(i.to_string()),
        Value::Int(i) => Some(i.to_string()),
        Value::BigInt(i) => Some(i.to_string()),
        Value::HugeInt(i) => Some(i.to_string()),
        Value::UTinyInt(i) => Some(i.to_string()),
        Value::USmallInt(i) => Some(i.to_string()),
        Value::UInt(i) => Some(i.to_string()),
        Value::UBigInt(i) => Some(i.to_string()),
        Value::Float(f) => Some(f.to_string()),
        Value::Double(f) => Some(f.to_string()),
        Value::Timestamp(_, i) => {
            let secs = i / 1_000_000;
            let nsecs = ((i % 1_000_000) * 1000) as u32;
            chrono::DateTime::from_timestamp(secs, nsecs)
                .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string())
        }
        Value::Date32(d) => {
            // 719163 days from 1 CE to 1970-01-01
            chrono::NaiveDate::from_num_days_from_ce_opt(d + 719_163)
                .map(|date| date.format("%Y-%m-%d").to_string())
        }
        _ => Some(format!("{value:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_to_string() {
        assert_eq!(value_to_string(Value::Null), None);
        assert_eq!(value_to_string(Value::Int(42)), Some("42".to_string()));
        assert_eq!(
            value_to_string(Value::Text("VARCHAR".to_string())),
            Some("VARCHAR".to_string())
        );
        assert_eq!(
            value_to_string(Value::Date32(0)),
            Some("1970-01-01".to_string())
        );
    }

    #[test]
    fn test_query_describe() {
        let engine = NativeEngine::open(None).unwrap();
        engine
            .execute("CREATE TABLE t (a INTEGER, b VARCHAR)")
            .unwrap();

        let rows = engine
            .query("SELECT column_name, column_type FROM (DESCRIBE t)")
            .unwrap();
        assert_eq!(
            rows,
            vec![
                vec!["a".to_string(), "INTEGER".to_string()],
                vec!["b".to_string(), "VARCHAR".to_string()],
            ]
        );
    }

    #[test]
    fn test_query_null_is_empty() {
        let engine = NativeEngine::open(None).unwrap();
        let rows = engine.query("SELECT NULL, 1").unwrap();
        assert_eq!(rows, vec![vec![String::new(), "1".to_string()]]);
    }

    #[test]
    fn test_execute_error() {
        let engine = NativeEngine::open(None).unwrap();
        let err = engine.execute("SELEC 1").unwrap_err();
        assert!(err.to_string().contains("DuckDB error"));
    }
}
