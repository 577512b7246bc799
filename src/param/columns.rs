//! `name:type` column specifications

use super::render::quote_literal;
use crate::error::{Error, Result};

/// A single column name with its declared SQL type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column name
    pub name: String,
    /// Declared SQL type
    pub column_type: String,
}

impl Column {
    /// Create a new column
    pub fn new(name: impl Into<String>, column_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: column_type.into(),
        }
    }
}

/// Ordered list of column specifications.
///
/// Names are not required to be unique; lookups resolve to the last entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Columns(Vec<Column>);

/// How keys are written inside a rendered `{key: 'type'}` literal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStyle {
    /// `{'col': 'TYPE'}`, expected by `read_csv`
    Quoted,
    /// `{col: 'TYPE'}`, expected by `read_json`
    Bare,
}

impl Columns {
    /// Create an empty column list
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a list of `name:type` tokens.
    ///
    /// Everything before the last `:` is the name, so names may contain
    /// colons themselves.
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Result<Self> {
        let mut columns = Vec::with_capacity(tokens.len());

        for token in tokens {
            let Some((name, column_type)) = token.as_ref().rsplit_once(':') else {
                let joined = tokens
                    .iter()
                    .map(AsRef::as_ref)
                    .collect::<Vec<_>>()
                    .join(",");
                return Err(Error::malformed_column_spec(joined));
            };
            columns.push(Column::new(name, column_type));
        }

        Ok(Self(columns))
    }

    /// Append a column
    pub fn push(&mut self, column: Column) {
        self.0.push(column);
    }

    /// Declared type of `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|c| c.name == name)
            .map(|c| c.column_type.as_str())
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no column was given
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Columns in declaration order
    pub fn iter(&self) -> std::slice::Iter<'_, Column> {
        self.0.iter()
    }

    /// Render as a DuckDB struct literal, or an empty string when empty
    pub fn to_literal(&self, keys: KeyStyle) -> String {
        if self.0.is_empty() {
            return String::new();
        }

        let entries: Vec<String> = self
            .0
            .iter()
            .map(|c| {
                let key = match keys {
                    KeyStyle::Quoted => quote_literal(&c.name),
                    KeyStyle::Bare => c.name.clone(),
                };
                format!("{key}: {}", quote_literal(&c.column_type))
            })
            .collect();

        format!("{{{}}}", entries.join(","))
    }
}

impl FromIterator<Column> for Columns {
    fn from_iter<I: IntoIterator<Item = Column>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Columns {
    type Item = &'a Column;
    type IntoIter = std::slice::Iter<'a, Column>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
