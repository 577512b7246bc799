//! Output module
//!
//! Inspects the Parquet files written by a conversion.
//!
//! # Overview
//!
//! The engine writes either a single file or, for hive partitioned and per
//! thread output, a directory tree of `*.parquet` files. This module reads
//! their footers to report row counts without scanning data pages.

mod reader;

pub use reader::{parquet_row_count, ParquetSummary};
