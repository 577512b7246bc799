//! CLI commands and argument parsing

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Convert CSV and JSON files to Parquet
#[derive(Parser, Debug)]
#[command(name = "fileconv")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Engine configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// DuckDB database file (default: in-memory)
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,

    /// Engine to use: auto, native or cli
    #[arg(long, global = true)]
    pub engine: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Parquet output options
    #[command(flatten)]
    pub parquet: ParquetWriteArgs,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert CSV file(s) to Parquet
    #[command(name = "csv2parquet")]
    Csv2Parquet(CsvArgs),

    /// Convert JSON file(s) to Parquet
    #[command(name = "json2parquet")]
    Json2Parquet(JsonArgs),

    /// Print the schema of Parquet file(s)
    DescribeParquet(ParquetReadArgs),

    /// Print crate and engine versions
    Version,
}

/// Options of the Parquet output, shared by all conversions
#[derive(Args, Debug)]
pub struct ParquetWriteArgs {
    /// Parquet compression: snappy, zstd, gzip or lz4
    #[arg(long, global = true, default_value = "snappy")]
    pub pq_compression: String,

    /// Rows per row group
    #[arg(long, global = true, default_value_t = 122_880)]
    pub pq_row_group_size: i64,

    /// Hive partition columns (comma separated)
    #[arg(long, global = true, value_delimiter = ',')]
    pub pq_partition_by: Vec<String>,

    /// Allow writing into an existing partitioned directory
    #[arg(long, global = true)]
    pub pq_overwrite_or_ignore: bool,

    /// File name pattern of partitioned output, with {i} or {uuid}
    #[arg(long, global = true, default_value = "data_{i}.parquet")]
    pub pq_filename_pattern: String,

    /// Write one file per thread
    #[arg(long, global = true)]
    pub pq_per_thread_output: bool,
}

/// `csv2parquet` arguments
#[derive(Args, Debug)]
pub struct CsvArgs {
    /// Source file, glob or list of files
    #[arg(long)]
    pub source: String,

    /// Destination file (or directory for partitioned output)
    #[arg(long, required_unless_present = "describe")]
    pub dest: Option<String>,

    /// Column delimiter
    #[arg(long, default_value = ",")]
    pub delim: String,

    /// Quote character
    #[arg(long, default_value = "\"")]
    pub quote: String,

    /// Line terminator (empty: auto detect)
    #[arg(long, default_value = "")]
    pub new_line: String,

    /// Decimal separator
    #[arg(long, default_value = ".")]
    pub decimal_sep: String,

    /// Escape character
    #[arg(long, default_value = "\"")]
    pub escape: String,

    /// Date format, e.g. %d/%m/%Y
    #[arg(long, default_value = "")]
    pub dateformat: String,

    /// Timestamp format
    #[arg(long, default_value = "")]
    pub timestampformat: String,

    /// Input compression: auto, none, gzip or zstd
    #[arg(long, default_value = "auto")]
    pub compression: String,

    /// Maximum line size in bytes
    #[arg(long, default_value_t = 2_097_152)]
    pub max_line_size: i64,

    /// Rows sampled for auto detection
    #[arg(long, default_value_t = 20_480, allow_hyphen_values = true)]
    pub sample_size: i64,

    /// Lines to skip at the top of each file
    #[arg(long, default_value_t = 0)]
    pub skip: i64,

    /// Columns that never hold NULL (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub force_not_null: Vec<String>,

    /// Types the sniffer may choose from (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub auto_type_candidates: Vec<String>,

    /// Column names and types as name:type (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<String>,

    /// Column names (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub names: Vec<String>,

    /// Strings that represent NULL (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub nullstr: Vec<String>,

    /// Type overrides as name:type (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub types: Vec<String>,

    /// Disable dialect and type detection
    #[arg(long)]
    pub disable_autodetect: bool,

    /// Read every column as VARCHAR
    #[arg(long)]
    pub all_varchar: bool,

    /// Keep quoted values that match the null string
    #[arg(long)]
    pub disable_quoted_nulls: bool,

    /// Normalize column names
    #[arg(long)]
    pub normalize_names: bool,

    /// Add a column with the source file name
    #[arg(long)]
    pub filename: bool,

    /// First line is a header
    #[arg(long)]
    pub header: bool,

    /// Interpret the path as a hive partitioned tree
    #[arg(long)]
    pub hive_partitioning: bool,

    /// Skip rows that fail to parse
    #[arg(long)]
    pub ignore_errors: bool,

    /// Pad missing columns with NULL
    #[arg(long)]
    pub null_padding: bool,

    /// Use the parallel CSV reader
    #[arg(long)]
    pub parallel: bool,

    /// Unify columns of multiple files by name
    #[arg(long)]
    pub union_by_name: bool,

    /// Print the detected schema instead of converting
    #[arg(long)]
    pub describe: bool,
}

/// `json2parquet` arguments
#[derive(Args, Debug)]
pub struct JsonArgs {
    /// Source file, glob or list of files
    #[arg(long)]
    pub source: String,

    /// Destination file (or directory for partitioned output)
    #[arg(long, required_unless_present = "describe")]
    pub dest: Option<String>,

    /// Disable key and type detection
    #[arg(long)]
    pub disable_autodetect: bool,

    /// Input compression: auto, none, gzip or zstd
    #[arg(long, default_value = "auto")]
    pub compression: String,

    /// Convert strings holding integers to numbers
    #[arg(long)]
    pub convert_str_to_int: bool,

    /// Date format
    #[arg(long, default_value = "iso")]
    pub dateformat: String,

    /// Add a column with the source file name
    #[arg(long)]
    pub filename: bool,

    /// auto, unstructured, newline_delimited or array
    #[arg(long, default_value = "array")]
    pub format: String,

    /// Interpret the path as a hive partitioned tree
    #[arg(long)]
    pub hive_partitioning: bool,

    /// Skip malformed objects (newline delimited input only)
    #[arg(long)]
    pub ignore_errors: bool,

    /// Nesting depth used by type detection, -1 for unlimited
    #[arg(long, default_value_t = -1, allow_hyphen_values = true)]
    pub max_depth: i64,

    /// Maximum size of a JSON object in bytes
    #[arg(long, default_value_t = 16_777_216)]
    pub max_obj_size: u64,

    /// auto, true or false
    #[arg(long, default_value = "auto")]
    pub records: String,

    /// Objects sampled for type detection, -1 for all
    #[arg(long, default_value_t = 20_480, allow_hyphen_values = true)]
    pub sample_size: i64,

    /// Timestamp format
    #[arg(long, default_value = "iso")]
    pub timestampformat: String,

    /// Unify keys of multiple files by name
    #[arg(long)]
    pub union_by_name: bool,

    /// Key names and types as name:type (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<String>,

    /// Expand nested objects into top level columns
    #[arg(long)]
    pub flatten: bool,

    /// Print the detected schema instead of converting
    #[arg(long)]
    pub describe: bool,
}

/// `describe-parquet` arguments
#[derive(Args, Debug)]
pub struct ParquetReadArgs {
    /// Source file, glob or list of files
    #[arg(long)]
    pub source: String,

    /// Load BINARY columns as VARCHAR
    #[arg(long)]
    pub binary_as_string: bool,

    /// Add a file_row_number column
    #[arg(long)]
    pub file_row_number: bool,

    /// Add a column with the source file name
    #[arg(long)]
    pub filename: bool,

    /// Interpret the path as a hive partitioned tree
    #[arg(long)]
    pub hive_partitioning: bool,

    /// Unify columns of multiple files by name
    #[arg(long)]
    pub union_by_name: bool,
}
