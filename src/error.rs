//! Error types for fileconv
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use std::fmt;
use thiserror::Error;

/// Stage of a conversion in which the engine rejected a statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnginePhase {
    /// Connection setup and boot statements
    Bootstrap,
    /// Reading or importing the source files
    Read,
    /// `DESCRIBE` style introspection
    Introspect,
    /// Creating the scratch table used to expand a struct type
    FlattenCreate,
    /// Dropping a scratch table
    FlattenDrop,
    /// The final `COPY ... TO` statement
    Copy,
}

impl fmt::Display for EnginePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EnginePhase::Bootstrap => "bootstrap",
            EnginePhase::Read => "read",
            EnginePhase::Introspect => "introspect",
            EnginePhase::FlattenCreate => "flatten-create",
            EnginePhase::FlattenDrop => "flatten-drop",
            EnginePhase::Copy => "copy",
        };
        f.write_str(name)
    }
}

/// The main error type for fileconv
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Parameter Errors
    // ============================================================================
    /// A `name:type` token has no type
    #[error("Malformed column spec '{spec}': expected name:type")]
    MalformedColumnSpec {
        /// The raw tokens, joined with `,`
        spec: String,
    },

    /// A string outside a closed option set
    #[error("Invalid value for '{field}': {value}")]
    InvalidValue {
        /// Option name
        field: String,
        /// Rejected value
        value: String,
    },

    // ============================================================================
    // Engine Errors
    // ============================================================================
    /// The engine rejected a statement
    #[error("Engine error during {phase}: {source} (statement: {statement})")]
    Engine {
        /// Conversion stage the statement belonged to
        phase: EnginePhase,
        /// The rejected SQL
        statement: String,
        /// Error reported by the engine
        #[source]
        source: Box<Error>,
    },

    /// In-process DuckDB error
    #[cfg(feature = "native")]
    #[error("DuckDB error: {0}")]
    Duckdb(#[from] duckdb::Error),

    /// The `duckdb` executable failed or could not be started
    #[error("DuckDB process error: {message}")]
    EngineProcess {
        /// Standard error of the process, or how it failed
        message: String,
    },

    // ============================================================================
    // Schema Errors
    // ============================================================================
    /// Flattening was asked for a column that is not a STRUCT
    #[error("Column '{column}' is not a STRUCT: {column_type}")]
    NotStruct {
        /// Column name
        column: String,
        /// Its actual type
        column_type: String,
    },

    /// Recursive unnest and flattened names disagree on the column count
    #[error(
        "Unnested columns and flattened columns do not match: {unnested} unnested, {flattened} flattened"
    )]
    SchemaConsistency {
        /// Columns produced by the recursive unnest
        unnested: usize,
        /// Flattened column names
        flattened: usize,
    },

    /// A scratch table could not be dropped; logged, never returned
    #[error("Failed to drop temporary table '{table}': {message}")]
    ResourceCleanup {
        /// Scratch table name
        table: String,
        /// Engine error of the drop
        message: String,
    },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    /// Invalid or unusable configuration
    #[error("Configuration error: {message}")]
    Config {
        /// What is wrong
        message: String,
    },

    /// Malformed YAML config file
    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Malformed JSON output of the `duckdb` executable
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Output Errors
    // ============================================================================
    /// Unreadable Parquet output
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// File system or process IO failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    /// Any other failure, with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a malformed column spec error
    pub fn malformed_column_spec(spec: impl Into<String>) -> Self {
        Self::MalformedColumnSpec { spec: spec.into() }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create an engine process error
    pub fn process(message: impl Into<String>) -> Self {
        Self::EngineProcess {
            message: message.into(),
        }
    }

    /// Tag an error with the engine phase and statement it occurred in
    pub fn engine(phase: EnginePhase, statement: impl Into<String>, source: Error) -> Self {
        Self::Engine {
            phase,
            statement: statement.into(),
            source: Box::new(source),
        }
    }

    /// Phase of an engine error, if this is one
    pub fn phase(&self) -> Option<EnginePhase> {
        match self {
            Error::Engine { phase, .. } => Some(*phase),
            _ => None,
        }
    }
}

/// Result type alias for fileconv
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;

    /// Mark an error as coming from the engine running `statement` during `phase`
    fn phase(self, phase: EnginePhase, statement: &str) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }

    fn phase(self, phase: EnginePhase, statement: &str) -> Result<T> {
        self.map_err(|e| Error::engine(phase, statement, e.into()))
    }
}
