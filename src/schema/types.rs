//! Column and table descriptions returned by introspection

use crate::param::column_ref;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static STRUCT_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)^\s*STRUCT\s*\(.*\)\s*$").unwrap());

const NAME_HEADER: &str = "COLUMN NAME";
const TYPE_HEADER: &str = "COLUMN TYPE";

/// One column of a described table or query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDesc {
    /// Column name
    pub name: String,
    /// Column type as printed by the engine
    pub column_type: String,
}

impl ColumnDesc {
    /// Column `name` of type `column_type`
    pub fn new(name: impl Into<String>, column_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: column_type.into(),
        }
    }

    /// Whether the type uses the `STRUCT(...)` grammar, case insensitive
    pub fn is_struct(&self) -> bool {
        is_struct_type(&self.column_type)
    }
}

/// Whether `column_type` is a STRUCT type
pub fn is_struct_type(column_type: &str) -> bool {
    STRUCT_TYPE.is_match(column_type)
}

/// Ordered columns of a table or query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableDescription {
    columns: Vec<ColumnDesc>,
}

impl TableDescription {
    /// Description with `columns` in order
    pub fn new(columns: Vec<ColumnDesc>) -> Self {
        Self { columns }
    }

    /// Columns in order
    pub fn columns(&self) -> &[ColumnDesc] {
        &self.columns
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether no column was described
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Iterate over the columns in order
    pub fn iter(&self) -> std::slice::Iter<'_, ColumnDesc> {
        self.columns.iter()
    }

    /// Whether any column is a STRUCT
    pub fn has_struct(&self) -> bool {
        self.columns.iter().any(ColumnDesc::is_struct)
    }

    /// Select list that expands every STRUCT column recursively.
    ///
    /// `[a1 VARCHAR, a2 STRUCT(..), a3 DOUBLE]` gives
    /// `a1,unnest(a2, recursive := true),a3`. Names that are not plain
    /// identifiers are quoted.
    pub fn unnested_projection(&self) -> String {
        self.columns
            .iter()
            .map(|c| {
                let name = column_ref(&c.name);
                if c.is_struct() {
                    format!("unnest({name}, recursive := true)")
                } else {
                    name
                }
            })
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl FromIterator<ColumnDesc> for TableDescription {
    fn from_iter<I: IntoIterator<Item = ColumnDesc>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a TableDescription {
    type Item = &'a ColumnDesc;
    type IntoIter = std::slice::Iter<'a, ColumnDesc>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}

/// Two column text table, one line per column
impl fmt::Display for TableDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name_width = self
            .columns
            .iter()
            .map(|c| c.name.chars().count())
            .fold(NAME_HEADER.len(), usize::max);
        let type_width = self
            .columns
            .iter()
            .map(|c| c.column_type.chars().count())
            .fold(TYPE_HEADER.len(), usize::max);

        writeln!(
            f,
            "{NAME_HEADER:<name_width$} | {TYPE_HEADER:<type_width$} "
        )?;
        writeln!(
            f,
            "{}|{}",
            "=".repeat(name_width + 1),
            "=".repeat(type_width + 1)
        )?;
        for c in &self.columns {
            writeln!(
                f,
                "{:<name_width$} | {:<type_width$} ",
                c.name, c.column_type
            )?;
        }
        Ok(())
    }
}
