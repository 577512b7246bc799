//! Parameter builders
//!
//! Typed configuration for the DuckDB file readers and the Parquet writer,
//! rendered into the option-list syntax the engine expects.
//!
//! # Overview
//!
//! - [`Columns`]: `name:type` column specifications
//! - [`CsvReadParams`]: options of `read_csv`
//! - [`JsonReadParams`]: options of `read_json`
//! - [`ParquetWriteParams`]: options of `COPY ... TO ... (FORMAT PARQUET)`
//! - [`ParquetReadParams`]: options of `read_parquet`
//!
//! Every option renders only when it differs from its default, in a fixed
//! order, so identical params always produce identical SQL.

mod columns;
mod csv;
mod json;
mod parquet;
mod render;
mod types;

pub use columns::{Column, Columns, KeyStyle};
pub use csv::CsvReadParams;
pub use json::JsonReadParams;
pub use parquet::{HivePartitionConfig, ParquetReadParams, ParquetWriteParams};
pub use render::{column_ref, quote_ident, quote_literal};
pub use types::{Compression, JsonFormat, JsonRecords, ParquetCompression};
