// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]

//! # fileconv
//!
//! Convert CSV and JSON files to Apache Parquet through DuckDB.
//!
//! The crate does no parsing or encoding of its own. Typed reader and writer
//! options are rendered into the option lists of DuckDB's `read_csv`,
//! `read_json` and `COPY ... TO` and one statement per conversion is handed
//! to the engine.
//!
//! ## Features
//!
//! - **Typed options**: every `read_csv` / `read_json` / Parquet option, rendered only when it differs from its default
//! - **Hive partitioning**: partitioned and per-thread Parquet output
//! - **Flattening**: nested JSON objects expanded into top level columns
//! - **Two engines**: in-process DuckDB or the `duckdb` executable
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fileconv::{Converter, CsvReadParams, EngineConfig, ParquetWriteParams, Result};
//!
//! fn main() -> Result<()> {
//!     let converter = Converter::connect(&EngineConfig::default())?;
//!
//!     let read = CsvReadParams::new().with_header(true);
//!     converter.csv_to_parquet("data/*.csv", "data.parquet", &ParquetWriteParams::new(), &read)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         Converter                            │
//! │  csv_to_parquet()   json_to_parquet()   describe_*()         │
//! └──────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────┬───────────────┴──────────┬───────────────────┐
//! │    Params    │          Schema          │      Engine       │
//! ├──────────────┼──────────────────────────┼───────────────────┤
//! │ CSV read     │ DESCRIBE                 │ Native (duckdb)   │
//! │ JSON read    │ STRUCT flattening        │ CLI process       │
//! │ Parquet write│ Scratch tables           │                   │
//! └──────────────┴──────────────────────────┴───────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Reader and writer parameters rendered to SQL option lists
pub mod param;

/// Schema introspection and STRUCT flattening
pub mod schema;

/// SQL engine implementations
pub mod engine;

/// Conversion orchestrator
pub mod convert;

/// Engine configuration
pub mod config;

/// Parquet output inspection
pub mod output;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{EngineConfig, EngineKind};
pub use convert::{Converter, Outcome};
pub use engine::Engine;
pub use error::{EnginePhase, Error, Result};
pub use param::{
    Columns, Compression, CsvReadParams, HivePartitionConfig, JsonFormat, JsonReadParams,
    JsonRecords, ParquetCompression, ParquetReadParams, ParquetWriteParams,
};
pub use schema::{ColumnDesc, TableDescription};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
