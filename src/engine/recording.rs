//! Scripted engine for unit tests
//!
//! Records every statement, answers queries from scripted descriptions and
//! expands `SELECT C1.* FROM <table>` for tables created with a STRUCT
//! column, the way DuckDB does for simple struct types.

use super::Engine;
use crate::error::{Error, Result};
use std::cell::RefCell;
use std::collections::HashMap;

#[derive(Default)]
pub(crate) struct RecordingEngine {
    statements: RefCell<Vec<String>>,
    scripted: Vec<(String, Vec<Vec<String>>)>,
    failures: Vec<String>,
    struct_tables: RefCell<HashMap<String, String>>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer queries containing `pattern` with the given name/type rows.
    /// The first matching pattern wins.
    pub fn with_description(mut self, pattern: &str, columns: &[(&str, &str)]) -> Self {
        let rows = columns
            .iter()
            .map(|(name, column_type)| vec![(*name).to_string(), (*column_type).to_string()])
            .collect();
        self.scripted.push((pattern.to_string(), rows));
        self
    }

    /// Fail every statement containing `pattern`
    pub fn failing_on(mut self, pattern: &str) -> Self {
        self.failures.push(pattern.to_string());
        self
    }

    /// Every statement received so far, in order
    pub fn statements(&self) -> Vec<String> {
        self.statements.borrow().clone()
    }

    /// Statements containing `pattern`
    pub fn matching(&self, pattern: &str) -> Vec<String> {
        self.statements
            .borrow()
            .iter()
            .filter(|s| s.contains(pattern))
            .cloned()
            .collect()
    }

    /// STRUCT scratch tables created and not dropped yet
    pub fn live_struct_tables(&self) -> usize {
        self.struct_tables.borrow().len()
    }

    fn record(&self, sql: &str) -> Result<()> {
        self.statements.borrow_mut().push(sql.to_string());
        match self.failures.iter().find(|p| sql.contains(p.as_str())) {
            Some(pattern) => Err(Error::process(format!("injected failure on '{pattern}'"))),
            None => Ok(()),
        }
    }
}

impl Engine for RecordingEngine {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn execute(&self, sql: &str) -> Result<()> {
        self.record(sql)?;

        if let Some(rest) = sql.strip_prefix("CREATE TABLE ") {
            if let Some((name, definition)) = rest.split_once(" (C1 ") {
                let column_type = definition.strip_suffix(')').unwrap_or(definition);
                self.struct_tables
                    .borrow_mut()
                    .insert(name.to_string(), column_type.to_string());
            }
        } else if let Some(name) = sql.strip_prefix("DROP TABLE IF EXISTS ") {
            self.struct_tables.borrow_mut().remove(name);
        }

        Ok(())
    }

    fn query(&self, sql: &str) -> Result<Vec<Vec<String>>> {
        self.record(sql)?;

        if let Some((_, rest)) = sql.split_once("C1.* FROM ") {
            let name = rest.trim_end_matches(')');
            let column_type = self
                .struct_tables
                .borrow()
                .get(name)
                .cloned()
                .ok_or_else(|| Error::process(format!("Table {name} does not exist")))?;
            return Ok(struct_fields(&column_type)
                .into_iter()
                .map(|(name, column_type)| vec![name, column_type])
                .collect());
        }

        Ok(self
            .scripted
            .iter()
            .find(|(pattern, _)| sql.contains(pattern.as_str()))
            .map(|(_, rows)| rows.clone())
            .unwrap_or_default())
    }

    fn version(&self) -> Result<String> {
        Ok("v0.0.0-test".to_string())
    }
}

/// Top level fields of `STRUCT(name type, ...)`
fn struct_fields(column_type: &str) -> Vec<(String, String)> {
    let inner = column_type
        .trim()
        .strip_prefix("STRUCT(")
        .and_then(|s| s.strip_suffix(')'))
        .unwrap_or_default();

    let mut fields = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, ch) in inner.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                fields.push(&inner[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    fields.push(&inner[start..]);

    fields
        .into_iter()
        .filter_map(|f| f.trim().split_once(' '))
        .map(|(name, column_type)| (name.to_string(), column_type.trim().to_string()))
        .collect()
}

#[test]
fn test_struct_fields() {
    assert_eq!(
        struct_fields("STRUCT(b1 VARCHAR, b2 STRUCT(c1 BIGINT, c2 DOUBLE))"),
        vec![
            ("b1".to_string(), "VARCHAR".to_string()),
            ("b2".to_string(), "STRUCT(c1 BIGINT, c2 DOUBLE)".to_string()),
        ]
    );
}
