//! Option list rendering
//!
//! Every builder funnels its fields through [`OptionList`], which applies the
//! omit-if-default rule and formats values as SQL literals.

use super::columns::{Columns, KeyStyle};
use regex::Regex;
use std::fmt::Display;
use std::sync::LazyLock;

static PLAIN_IDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z_][a-z0-9_]*$").unwrap());

/// Keywords that cannot appear as a bare column reference
const RESERVED_KEYWORDS: &[&str] = &[
    "all", "analyse", "analyze", "and", "anti", "any", "array", "as", "asc", "asof",
    "asymmetric", "authorization", "between", "binary", "both", "case", "cast", "check",
    "collate", "collation", "column", "concurrently", "constraint", "create", "cross",
    "current_catalog", "current_date", "current_role", "current_schema", "current_time",
    "current_timestamp", "current_user", "default", "deferrable", "desc", "describe",
    "distinct", "do", "else", "end", "except", "false", "fetch", "for", "foreign", "freeze",
    "from", "full", "glob", "grant", "group", "having", "ilike", "in", "initially", "inner",
    "intersect", "into", "is", "isnull", "join", "lambda", "lateral", "leading", "left",
    "like", "limit", "localtime", "localtimestamp", "map", "natural", "not", "notnull",
    "null", "offset", "on", "only", "or", "order", "outer", "overlaps", "pivot",
    "pivot_longer", "pivot_wider", "placing", "positional", "primary", "qualify",
    "references", "returning", "right", "select", "semi", "session_user", "show", "similar",
    "some", "struct", "summarize", "symmetric", "table", "tablesample", "then", "to",
    "trailing", "true", "try_cast", "union", "unique", "unpivot", "user", "using",
    "variadic", "verbose", "when", "where", "window", "with",
];

/// Quote a value as a SQL string literal
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Quote a value as a SQL identifier
pub fn quote_ident(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Column reference for a select list.
///
/// Plain lower case names stay bare; anything else, reserved words
/// included, is quoted with [`quote_ident`].
pub fn column_ref(name: &str) -> String {
    if PLAIN_IDENT.is_match(name) && !RESERVED_KEYWORDS.contains(&name) {
        name.to_string()
    } else {
        quote_ident(name)
    }
}

/// Ordered list of rendered `key <sep> value` options
#[derive(Debug)]
pub(crate) struct OptionList {
    separator: &'static str,
    items: Vec<String>,
}

impl OptionList {
    /// Options of a table function call: `key = value`
    pub fn table_function() -> Self {
        Self {
            separator: " = ",
            items: Vec::new(),
        }
    }

    /// Options of a `COPY ... TO` statement: `KEY value`
    pub fn copy() -> Self {
        Self {
            separator: " ",
            items: Vec::new(),
        }
    }

    /// Push a token verbatim
    pub fn raw(&mut self, token: impl Into<String>) -> &mut Self {
        self.items.push(token.into());
        self
    }

    fn push(&mut self, key: &str, value: impl Display) {
        self.items.push(format!("{key}{}{value}", self.separator));
    }

    pub fn flag(&mut self, key: &str, value: bool, default: bool) -> &mut Self {
        if value != default {
            self.push(key, value);
        }
        self
    }

    pub fn number<N: PartialEq + Display>(&mut self, key: &str, value: N, default: N) -> &mut Self {
        if value != default {
            self.push(key, value);
        }
        self
    }

    pub fn string(&mut self, key: &str, value: &str, default: &str) -> &mut Self {
        if value != default {
            self.push(key, quote_literal(value));
        }
        self
    }

    /// `key = ['a','b']`, omitted when empty
    pub fn list(&mut self, key: &str, values: &[String]) -> &mut Self {
        if !values.is_empty() {
            let quoted: Vec<String> = values.iter().map(|v| quote_literal(v)).collect();
            self.push(key, format!("[{}]", quoted.join(",")));
        }
        self
    }

    /// `KEY (a,b)` with bare names, omitted when empty
    pub fn names(&mut self, key: &str, values: &[String]) -> &mut Self {
        if !values.is_empty() {
            self.push(key, format!("({})", values.join(",")));
        }
        self
    }

    /// `key = {...}` struct literal, omitted when empty
    pub fn columns(&mut self, key: &str, columns: &Columns, keys: KeyStyle) -> &mut Self {
        if !columns.is_empty() {
            self.push(key, columns.to_literal(keys));
        }
        self
    }

    /// Fragment appended after the path argument of a reader function.
    ///
    /// Empty when no option deviates from its default, otherwise starts with `,`.
    pub fn to_fragment(&self) -> String {
        if self.items.is_empty() {
            return String::new();
        }
        format!(",{}", self.items.join(","))
    }

    /// Parenthesized option list of a `COPY` statement
    pub fn to_parenthesized(&self) -> String {
        format!("({})", self.items.join(","))
    }
}
