//! `read_csv` parameters
//!
//! See <https://duckdb.org/docs/data/csv/overview#parameters> for the meaning
//! of each option.

use super::columns::{Columns, KeyStyle};
use super::render::OptionList;
use super::types::Compression;

const DEFAULT_ALLOW_QUOTED_NULLS: bool = true;
const DEFAULT_AUTO_DETECT: bool = true;
const DEFAULT_DATEFORMAT: &str = "";
const DEFAULT_DECIMAL_SEPARATOR: &str = ".";
const DEFAULT_DELIM: &str = ",";
const DEFAULT_ESCAPE: &str = "\"";
const DEFAULT_MAX_LINE_SIZE: i64 = 2_097_152;
const DEFAULT_NEW_LINE: &str = "";
const DEFAULT_QUOTE: &str = "\"";
const DEFAULT_SAMPLE_SIZE: i64 = 20_480;
const DEFAULT_SKIP: i64 = 0;
const DEFAULT_TIMESTAMPFORMAT: &str = "";

/// Options for reading CSV files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvReadParams {
    all_varchar: bool,
    allow_quoted_nulls: bool,
    auto_detect: bool,
    auto_type_candidates: Vec<String>,
    columns: Columns,
    compression: Compression,
    dateformat: String,
    decimal_separator: String,
    delim: String,
    escape: String,
    filename: bool,
    force_not_null: Vec<String>,
    header: bool,
    hive_partitioning: bool,
    ignore_errors: bool,
    max_line_size: i64,
    names: Vec<String>,
    new_line: String,
    normalize_names: bool,
    null_padding: bool,
    nullstr: Vec<String>,
    parallel: bool,
    quote: String,
    sample_size: i64,
    skip: i64,
    timestampformat: String,
    types: Columns,
    union_by_name: bool,
    describe: bool,
}

impl Default for CsvReadParams {
    fn default() -> Self {
        Self {
            all_varchar: false,
            allow_quoted_nulls: DEFAULT_ALLOW_QUOTED_NULLS,
            auto_detect: DEFAULT_AUTO_DETECT,
            auto_type_candidates: Vec::new(),
            columns: Columns::new(),
            compression: Compression::default(),
            dateformat: DEFAULT_DATEFORMAT.to_string(),
            decimal_separator: DEFAULT_DECIMAL_SEPARATOR.to_string(),
            delim: DEFAULT_DELIM.to_string(),
            escape: DEFAULT_ESCAPE.to_string(),
            filename: false,
            force_not_null: Vec::new(),
            header: false,
            hive_partitioning: false,
            ignore_errors: false,
            max_line_size: DEFAULT_MAX_LINE_SIZE,
            names: Vec::new(),
            new_line: DEFAULT_NEW_LINE.to_string(),
            normalize_names: false,
            null_padding: false,
            nullstr: Vec::new(),
            parallel: false,
            quote: DEFAULT_QUOTE.to_string(),
            sample_size: DEFAULT_SAMPLE_SIZE,
            skip: DEFAULT_SKIP,
            timestampformat: DEFAULT_TIMESTAMPFORMAT.to_string(),
            types: Columns::new(),
            union_by_name: false,
            describe: false,
        }
    }
}

impl CsvReadParams {
    /// Create params with every option at its default
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip type detection and read every column as VARCHAR
    #[must_use]
    pub fn with_all_varchar(mut self, all_varchar: bool) -> Self {
        self.all_varchar = all_varchar;
        self
    }

    /// Convert quoted values to NULL when they match the null string
    #[must_use]
    pub fn with_allow_quoted_nulls(mut self, allow_quoted_nulls: bool) -> Self {
        self.allow_quoted_nulls = allow_quoted_nulls;
        self
    }

    /// Auto detect dialect and column types
    #[must_use]
    pub fn with_auto_detect(mut self, auto_detect: bool) -> Self {
        self.auto_detect = auto_detect;
        self
    }

    /// Types the sniffer may choose from
    #[must_use]
    pub fn with_auto_type_candidates(mut self, candidates: Vec<String>) -> Self {
        self.auto_type_candidates = candidates;
        self
    }

    /// Explicit names and types of every column. Disables auto detection.
    #[must_use]
    pub fn with_columns(mut self, columns: Columns) -> Self {
        self.columns = columns;
        self
    }

    /// Compression of the input files
    #[must_use]
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Date format, e.g. `%d/%m/%Y`
    #[must_use]
    pub fn with_dateformat(mut self, dateformat: impl Into<String>) -> Self {
        self.dateformat = dateformat.into();
        self
    }

    /// Decimal separator of numeric fields
    #[must_use]
    pub fn with_decimal_separator(mut self, separator: impl Into<String>) -> Self {
        self.decimal_separator = separator.into();
        self
    }

    /// Column delimiter
    #[must_use]
    pub fn with_delim(mut self, delim: impl Into<String>) -> Self {
        self.delim = delim.into();
        self
    }

    /// Escape character inside quoted fields
    #[must_use]
    pub fn with_escape(mut self, escape: impl Into<String>) -> Self {
        self.escape = escape.into();
        self
    }

    /// Add a column holding the source file name
    #[must_use]
    pub fn with_filename(mut self, filename: bool) -> Self {
        self.filename = filename;
        self
    }

    /// Columns whose empty values are not NULL
    #[must_use]
    pub fn with_force_not_null(mut self, columns: Vec<String>) -> Self {
        self.force_not_null = columns;
        self
    }

    /// First line holds the column names
    #[must_use]
    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    /// Read the path as a hive partitioned tree
    #[must_use]
    pub fn with_hive_partitioning(mut self, hive_partitioning: bool) -> Self {
        self.hive_partitioning = hive_partitioning;
        self
    }

    /// Skip rows that fail to parse
    #[must_use]
    pub fn with_ignore_errors(mut self, ignore_errors: bool) -> Self {
        self.ignore_errors = ignore_errors;
        self
    }

    /// Maximum line size in bytes
    #[must_use]
    pub fn with_max_line_size(mut self, max_line_size: i64) -> Self {
        self.max_line_size = max_line_size;
        self
    }

    /// Column names, overriding the header
    #[must_use]
    pub fn with_names(mut self, names: Vec<String>) -> Self {
        self.names = names;
        self
    }

    /// Line terminator, e.g. `\r\n`. Empty means auto detect.
    #[must_use]
    pub fn with_new_line(mut self, new_line: impl Into<String>) -> Self {
        self.new_line = new_line.into();
        self
    }

    /// Normalize column names to plain identifiers
    #[must_use]
    pub fn with_normalize_names(mut self, normalize_names: bool) -> Self {
        self.normalize_names = normalize_names;
        self
    }

    /// Pad rows with missing columns with NULL
    #[must_use]
    pub fn with_null_padding(mut self, null_padding: bool) -> Self {
        self.null_padding = null_padding;
        self
    }

    /// Strings that represent NULL
    #[must_use]
    pub fn with_nullstr(mut self, nullstr: Vec<String>) -> Self {
        self.nullstr = nullstr;
        self
    }

    /// Use the parallel CSV reader
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Quote character
    #[must_use]
    pub fn with_quote(mut self, quote: impl Into<String>) -> Self {
        self.quote = quote.into();
        self
    }

    /// Rows sampled for auto detection
    #[must_use]
    pub fn with_sample_size(mut self, sample_size: i64) -> Self {
        self.sample_size = sample_size;
        self
    }

    /// Lines to skip at the top of each file
    #[must_use]
    pub fn with_skip(mut self, skip: i64) -> Self {
        self.skip = skip;
        self
    }

    /// Timestamp format
    #[must_use]
    pub fn with_timestampformat(mut self, timestampformat: impl Into<String>) -> Self {
        self.timestampformat = timestampformat.into();
        self
    }

    /// Override the detected type of individual columns
    #[must_use]
    pub fn with_types(mut self, types: Columns) -> Self {
        self.types = types;
        self
    }

    /// Unify columns of multiple files by name
    #[must_use]
    pub fn with_union_by_name(mut self, union_by_name: bool) -> Self {
        self.union_by_name = union_by_name;
        self
    }

    /// Print the detected schema instead of converting
    #[must_use]
    pub fn with_describe(mut self, describe: bool) -> Self {
        self.describe = describe;
        self
    }

    /// Effective auto detection. Explicit columns always turn it off.
    pub fn auto_detect(&self) -> bool {
        self.auto_detect && self.columns.is_empty()
    }

    /// Rows sampled for detection
    pub fn sample_size(&self) -> i64 {
        self.sample_size
    }

    /// Whether to describe the source instead of converting it
    pub fn describe(&self) -> bool {
        self.describe
    }

    /// Render the options that differ from their defaults.
    ///
    /// Returns an empty string, or `,key = value,...` ready to follow the
    /// path argument of `read_csv`.
    pub fn params(&self) -> String {
        let mut options = OptionList::table_function();
        options
            .flag("all_varchar", self.all_varchar, false)
            .flag(
                "allow_quoted_nulls",
                self.allow_quoted_nulls,
                DEFAULT_ALLOW_QUOTED_NULLS,
            )
            .flag("auto_detect", self.auto_detect(), DEFAULT_AUTO_DETECT)
            .list("auto_type_candidates", &self.auto_type_candidates)
            .columns("columns", &self.columns, KeyStyle::Quoted)
            .string(
                "compression",
                self.compression.as_str(),
                Compression::default().as_str(),
            )
            .string("dateformat", &self.dateformat, DEFAULT_DATEFORMAT)
            .string(
                "decimal_separator",
                &self.decimal_separator,
                DEFAULT_DECIMAL_SEPARATOR,
            )
            .string("delim", &self.delim, DEFAULT_DELIM)
            .string("escape", &self.escape, DEFAULT_ESCAPE)
            .flag("filename", self.filename, false)
            .list("force_not_null", &self.force_not_null)
            .flag("header", self.header, false)
            .flag("hive_partitioning", self.hive_partitioning, false)
            .flag("ignore_errors", self.ignore_errors, false)
            .number("max_line_size", self.max_line_size, DEFAULT_MAX_LINE_SIZE)
            .list("names", &self.names)
            .string("new_line", &self.new_line, DEFAULT_NEW_LINE)
            .flag("normalize_names", self.normalize_names, false)
            .flag("null_padding", self.null_padding, false)
            .list("nullstr", &self.nullstr)
            .flag("parallel", self.parallel, false)
            .string("quote", &self.quote, DEFAULT_QUOTE)
            .number("sample_size", self.sample_size, DEFAULT_SAMPLE_SIZE)
            .number("skip", self.skip, DEFAULT_SKIP)
            .string(
                "timestampformat",
                &self.timestampformat,
                DEFAULT_TIMESTAMPFORMAT,
            )
            .columns("types", &self.types, KeyStyle::Quoted)
            .flag("union_by_name", self.union_by_name, false);

        options.to_fragment()
    }
}
