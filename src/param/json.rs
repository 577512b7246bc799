//! `read_json` parameters
//!
//! See <https://duckdb.org/docs/data/json/overview#parameters>.

use super::columns::{Columns, KeyStyle};
use super::render::OptionList;
use super::types::{Compression, JsonFormat, JsonRecords};

const DEFAULT_AUTO_DETECT: bool = true;
const DEFAULT_DATEFORMAT: &str = "iso";
const DEFAULT_MAX_DEPTH: i64 = -1;
const DEFAULT_MAX_OBJECT_SIZE: u64 = 16_777_216;
const DEFAULT_SAMPLE_SIZE: i64 = 20_480;
const DEFAULT_TIMESTAMPFORMAT: &str = "iso";

/// Options for reading JSON files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonReadParams {
    auto_detect: bool,
    columns: Columns,
    compression: Compression,
    convert_strings_to_integers: bool,
    dateformat: String,
    filename: bool,
    format: JsonFormat,
    hive_partitioning: bool,
    ignore_errors: bool,
    max_depth: i64,
    max_object_size: u64,
    records: JsonRecords,
    sample_size: i64,
    timestampformat: String,
    union_by_name: bool,
    flatten: bool,
    describe: bool,
}

impl Default for JsonReadParams {
    fn default() -> Self {
        Self {
            auto_detect: DEFAULT_AUTO_DETECT,
            columns: Columns::new(),
            compression: Compression::default(),
            convert_strings_to_integers: false,
            dateformat: DEFAULT_DATEFORMAT.to_string(),
            filename: false,
            format: JsonFormat::default(),
            hive_partitioning: false,
            ignore_errors: false,
            max_depth: DEFAULT_MAX_DEPTH,
            max_object_size: DEFAULT_MAX_OBJECT_SIZE,
            records: JsonRecords::default(),
            sample_size: DEFAULT_SAMPLE_SIZE,
            timestampformat: DEFAULT_TIMESTAMPFORMAT.to_string(),
            union_by_name: false,
            flatten: false,
            describe: false,
        }
    }
}

impl JsonReadParams {
    /// Create params with every option at its default
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Detect key names and value types automatically
    #[must_use]
    pub fn with_auto_detect(mut self, auto_detect: bool) -> Self {
        self.auto_detect = auto_detect;
        self
    }

    /// Key names and value types contained in the file
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

    /// Convert strings holding integers to a numeric type
    #[must_use]
    pub fn with_convert_strings_to_integers(mut self, convert: bool) -> Self {
        self.convert_strings_to_integers = convert;
        self
    }

    /// Date format
    #[must_use]
    pub fn with_dateformat(mut self, dateformat: impl Into<String>) -> Self {
        self.dateformat = dateformat.into();
        self
    }

    /// Add a `filename` column
    #[must_use]
    pub fn with_filename(mut self, filename: bool) -> Self {
        self.filename = filename;
        self
    }

    /// Structure of the input files
    #[must_use]
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    /// Read the path as a hive partitioned tree
    #[must_use]
    pub fn with_hive_partitioning(mut self, hive_partitioning: bool) -> Self {
        self.hive_partitioning = hive_partitioning;
        self
    }

    /// Ignore parse errors. Only honoured for newline delimited input.
    #[must_use]
    pub fn with_ignore_errors(mut self, ignore_errors: bool) -> Self {
        self.ignore_errors = ignore_errors;
        self
    }

    /// Nesting depth used by type detection, -1 for unlimited
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: i64) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Maximum size of a single JSON object in bytes
    #[must_use]
    pub fn with_max_object_size(mut self, max_object_size: u64) -> Self {
        self.max_object_size = max_object_size;
        self
    }

    /// Whether the top level values are records
    #[must_use]
    pub fn with_records(mut self, records: JsonRecords) -> Self {
        self.records = records;
        self
    }

    /// Objects sampled for type detection, -1 to scan the whole input
    #[must_use]
    pub fn with_sample_size(mut self, sample_size: i64) -> Self {
        self.sample_size = sample_size;
        self
    }

    /// Timestamp format
    #[must_use]
    pub fn with_timestampformat(mut self, timestampformat: impl Into<String>) -> Self {
        self.timestampformat = timestampformat.into();
        self
    }

    /// Unify keys of multiple files by name
    #[must_use]
    pub fn with_union_by_name(mut self, union_by_name: bool) -> Self {
        self.union_by_name = union_by_name;
        self
    }

    /// Expand nested STRUCT columns into top level columns
    #[must_use]
    pub fn with_flatten(mut self, flatten: bool) -> Self {
        self.flatten = flatten;
        self
    }

    /// Print the detected schema instead of converting
    #[must_use]
    pub fn with_describe(mut self, describe: bool) -> Self {
        self.describe = describe;
        self
    }

    /// Whether nested objects become top level columns
    pub fn flatten(&self) -> bool {
        self.flatten
    }

    /// Whether to describe the source instead of converting it
    pub fn describe(&self) -> bool {
        self.describe
    }

    /// Objects sampled for type detection
    pub fn sample_size(&self) -> i64 {
        self.sample_size
    }

    /// Render the options that differ from their defaults.
    ///
    /// `flatten` and `describe` steer the conversion and are never rendered.
    pub fn params(&self) -> String {
        let mut options = OptionList::table_function();
        options
            .flag("auto_detect", self.auto_detect, DEFAULT_AUTO_DETECT)
            .string(
                "compression",
                self.compression.as_str(),
                Compression::default().as_str(),
            )
            .flag(
                "convert_strings_to_integers",
                self.convert_strings_to_integers,
                false,
            )
            .string("dateformat", &self.dateformat, DEFAULT_DATEFORMAT)
            .flag("filename", self.filename, false)
            .string(
                "format",
                self.format.as_str(),
                JsonFormat::default().as_str(),
            )
            .flag("hive_partitioning", self.hive_partitioning, false)
            .flag("ignore_errors", self.ignore_errors, false)
            .number("maximum_depth", self.max_depth, DEFAULT_MAX_DEPTH)
            .number(
                "maximum_object_size",
                self.max_object_size,
                DEFAULT_MAX_OBJECT_SIZE,
            )
            .string(
                "records",
                self.records.as_str(),
                JsonRecords::default().as_str(),
            )
            .number("sample_size", self.sample_size, DEFAULT_SAMPLE_SIZE)
            .string(
                "timestampformat",
                &self.timestampformat,
                DEFAULT_TIMESTAMPFORMAT,
            )
            .flag("union_by_name", self.union_by_name, false)
            .columns("columns", &self.columns, KeyStyle::Bare);

        options.to_fragment()
    }
}
