//! CLI module
//!
//! Command-line interface for running conversions.
//!
//! # Commands
//!
//! - `csv2parquet` - Convert CSV file(s) to Parquet
//! - `json2parquet` - Convert JSON file(s) to Parquet
//! - `describe-parquet` - Print the schema of Parquet file(s)
//! - `version` - Print crate and engine versions

mod commands;
mod runner;

pub use commands::{Cli, Commands, CsvArgs, JsonArgs, ParquetReadArgs, ParquetWriteArgs};
pub use runner::Runner;
