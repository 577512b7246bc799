//! Closed option sets shared by the parameter builders
//!
//! Each enumeration renders to the exact string the DuckDB readers and
//! writers accept, and has a distinguished default.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Input Compression
// ============================================================================

/// Compression of the files being read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    /// Detect from the file extension
    #[default]
    Auto,
    /// Uncompressed input
    None,
    /// gzip
    Gzip,
    /// Zstandard
    Zstd,
}

impl Compression {
    /// Value passed to the reader
    pub fn as_str(&self) -> &'static str {
        match self {
            Compression::Auto => "auto",
            Compression::None => "none",
            Compression::Gzip => "gzip",
            Compression::Zstd => "zstd",
        }
    }
}

impl FromStr for Compression {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Compression::Auto),
            "none" => Ok(Compression::None),
            "gzip" => Ok(Compression::Gzip),
            "zstd" => Ok(Compression::Zstd),
            _ => Err(Error::invalid_value("compression", s)),
        }
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// JSON Format
// ============================================================================

/// Structural layout of a JSON input file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Detect from the content
    Auto,
    /// Sequence of JSON values, possibly spanning lines
    Unstructured,
    /// One JSON value per line
    NewlineDelimited,
    /// A single top-level array of values
    #[default]
    Array,
}

impl JsonFormat {
    /// Value passed to `read_json`
    pub fn as_str(&self) -> &'static str {
        match self {
            JsonFormat::Auto => "auto",
            JsonFormat::Unstructured => "unstructured",
            JsonFormat::NewlineDelimited => "newline_delimited",
            JsonFormat::Array => "array",
        }
    }
}

impl FromStr for JsonFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(JsonFormat::Auto),
            "unstructured" => Ok(JsonFormat::Unstructured),
            "newline_delimited" | "ndjson" => Ok(JsonFormat::NewlineDelimited),
            "array" => Ok(JsonFormat::Array),
            _ => Err(Error::invalid_value("format", s)),
        }
    }
}

impl fmt::Display for JsonFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// JSON Records
// ============================================================================

/// Whether JSON values should be unpacked into columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonRecords {
    /// Detect from the content
    #[default]
    Auto,
    /// Top level values are objects unpacked into columns
    True,
    /// Each top level value is read as a single column
    False,
}

impl JsonRecords {
    /// Value passed to `read_json`
    pub fn as_str(&self) -> &'static str {
        match self {
            JsonRecords::Auto => "auto",
            JsonRecords::True => "true",
            JsonRecords::False => "false",
        }
    }
}

impl FromStr for JsonRecords {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(JsonRecords::Auto),
            "true" => Ok(JsonRecords::True),
            "false" => Ok(JsonRecords::False),
            _ => Err(Error::invalid_value("records", s)),
        }
    }
}

impl fmt::Display for JsonRecords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Parquet Compression
// ============================================================================

/// Codec used for the Parquet output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParquetCompression {
    /// Snappy
    #[default]
    Snappy,
    /// Zstandard
    Zstd,
    /// gzip
    Gzip,
    /// LZ4
    Lz4,
}

impl ParquetCompression {
    /// Value passed to `COPY`
    pub fn as_str(&self) -> &'static str {
        match self {
            ParquetCompression::Snappy => "snappy",
            ParquetCompression::Zstd => "zstd",
            ParquetCompression::Gzip => "gzip",
            ParquetCompression::Lz4 => "lz4",
        }
    }
}

impl FromStr for ParquetCompression {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "snappy" => Ok(ParquetCompression::Snappy),
            "zstd" => Ok(ParquetCompression::Zstd),
            "gzip" => Ok(ParquetCompression::Gzip),
            "lz4" => Ok(ParquetCompression::Lz4),
            _ => Err(Error::invalid_value("pq-compression", s)),
        }
    }
}

impl fmt::Display for ParquetCompression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
