//! Parquet `COPY ... TO` options and `read_parquet` parameters

use super::render::OptionList;
use super::types::ParquetCompression;

const DEFAULT_ROW_GROUP_SIZE: i64 = 122_880;
const DEFAULT_FILENAME_PATTERN: &str = "data_{i}.parquet";

// ============================================================================
// Hive Partitioning
// ============================================================================

/// Hive partitioned output layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HivePartitionConfig {
    partition_by: Vec<String>,
    overwrite_or_ignore: bool,
    filename_pattern: String,
}

impl Default for HivePartitionConfig {
    fn default() -> Self {
        Self {
            partition_by: Vec::new(),
            overwrite_or_ignore: false,
            filename_pattern: DEFAULT_FILENAME_PATTERN.to_string(),
        }
    }
}

impl HivePartitionConfig {
    /// Defaults: no partitioning, `data_{i}.parquet` file names
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Columns the output directory tree is partitioned by
    #[must_use]
    pub fn with_partition_by<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.partition_by = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Allow writing into an existing directory
    #[must_use]
    pub fn with_overwrite_or_ignore(mut self, overwrite_or_ignore: bool) -> Self {
        self.overwrite_or_ignore = overwrite_or_ignore;
        self
    }

    /// File name pattern with `{i}` or `{uuid}`
    #[must_use]
    pub fn with_filename_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.filename_pattern = pattern.into();
        self
    }

    /// Partition columns in order
    pub fn partition_by(&self) -> &[String] {
        &self.partition_by
    }
}

// ============================================================================
// Write Params
// ============================================================================

/// Options of the Parquet output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParquetWriteParams {
    compression: ParquetCompression,
    row_group_size: i64,
    per_thread_output: bool,
    hive: HivePartitionConfig,
}

impl Default for ParquetWriteParams {
    fn default() -> Self {
        Self {
            compression: ParquetCompression::default(),
            row_group_size: DEFAULT_ROW_GROUP_SIZE,
            per_thread_output: false,
            hive: HivePartitionConfig::default(),
        }
    }
}

impl ParquetWriteParams {
    /// Defaults: snappy compression, 122880 rows per row group, no partitioning
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compression codec of the written file
    #[must_use]
    pub fn with_compression(mut self, compression: ParquetCompression) -> Self {
        self.compression = compression;
        self
    }

    /// Rows per row group
    #[must_use]
    pub fn with_row_group_size(mut self, row_group_size: i64) -> Self {
        self.row_group_size = row_group_size;
        self
    }

    /// Write one file per thread into the destination directory
    #[must_use]
    pub fn with_per_thread_output(mut self, per_thread_output: bool) -> Self {
        self.per_thread_output = per_thread_output;
        self
    }

    /// Replace the hive partitioning options
    #[must_use]
    pub fn with_hive_partition_config(mut self, hive: HivePartitionConfig) -> Self {
        self.hive = hive;
        self
    }

    /// Hive partitioning options
    pub fn hive_partition_config(&self) -> &HivePartitionConfig {
        &self.hive
    }

    /// Whether the destination is a directory rather than a single file
    pub fn writes_directory(&self) -> bool {
        self.per_thread_output || !self.hive.partition_by.is_empty()
    }

    /// Render the option list that follows the destination of `COPY ... TO`.
    ///
    /// Always starts with `FORMAT PARQUET`; hive options keep the order
    /// PARTITION_BY, PER_THREAD_OUTPUT, OVERWRITE_OR_IGNORE, FILENAME_PATTERN.
    pub fn params(&self) -> String {
        let mut options = OptionList::copy();
        options
            .raw("FORMAT PARQUET")
            .string(
                "COMPRESSION",
                self.compression.as_str(),
                ParquetCompression::default().as_str(),
            )
            .number("ROW_GROUP_SIZE", self.row_group_size, DEFAULT_ROW_GROUP_SIZE)
            .names("PARTITION_BY", &self.hive.partition_by)
            .flag("PER_THREAD_OUTPUT", self.per_thread_output, false)
            .number(
                "OVERWRITE_OR_IGNORE",
                u8::from(self.hive.overwrite_or_ignore),
                0,
            )
            .string(
                "FILENAME_PATTERN",
                &self.hive.filename_pattern,
                DEFAULT_FILENAME_PATTERN,
            );

        options.to_parenthesized()
    }
}

// ============================================================================
// Read Params
// ============================================================================

/// Options for reading Parquet files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParquetReadParams {
    binary_as_string: bool,
    file_row_number: bool,
    filename: bool,
    hive_partitioning: bool,
    union_by_name: bool,
}

impl ParquetReadParams {
    /// Defaults: every option off
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load BINARY columns as VARCHAR
    #[must_use]
    pub fn with_binary_as_string(mut self, binary_as_string: bool) -> Self {
        self.binary_as_string = binary_as_string;
        self
    }

    /// Add a `file_row_number` column
    #[must_use]
    pub fn with_file_row_number(mut self, file_row_number: bool) -> Self {
        self.file_row_number = file_row_number;
        self
    }

    /// Add a `filename` column
    #[must_use]
    pub fn with_filename(mut self, filename: bool) -> Self {
        self.filename = filename;
        self
    }

    /// Read the path as a hive partitioned tree
    #[must_use]
    pub fn with_hive_partitioning(mut self, hive_partitioning: bool) -> Self {
        self.hive_partitioning = hive_partitioning;
        self
    }

    /// Unify columns of multiple files by name
    #[must_use]
    pub fn with_union_by_name(mut self, union_by_name: bool) -> Self {
        self.union_by_name = union_by_name;
        self
    }

    /// `read_parquet` option fragment, empty when every option is default
    pub fn params(&self) -> String {
        let mut options = OptionList::table_function();
        options
            .flag("binary_as_string", self.binary_as_string, false)
            .flag("file_row_number", self.file_row_number, false)
            .flag("filename", self.filename, false)
            .flag("hive_partitioning", self.hive_partitioning, false)
            .flag("union_by_name", self.union_by_name, false);

        options.to_fragment()
    }
}
