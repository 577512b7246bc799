//! Schema introspection module
//!
//! Describes tables and queries through the engine and flattens nested
//! STRUCT columns into top level columns.
//!
//! # Features
//!
//! - **Introspection**: `describe` returns ordered name/type pairs
//! - **Flattening**: STRUCT columns become `{parent}_{child}` leaves
//! - **Scratch tables**: engine side tables dropped on every exit path

mod flatten;
mod types;

pub use flatten::{describe, flatten_columns, flatten_struct_column, flattened_select, ScratchTable};
pub use types::{is_struct_type, ColumnDesc, TableDescription};
