//! Parquet footer reader

use crate::error::{Error, Result};
use parquet::file::reader::{FileReader, SerializedFileReader};
use std::fs::File;
use std::path::{Path, PathBuf};

const PARQUET_EXTENSION: &str = "parquet";

/// Totals over the Parquet files of one output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParquetSummary {
    /// Files read, in sorted order
    pub files: Vec<PathBuf>,
    /// Row groups across all files
    pub row_groups: usize,
    /// Rows across all files
    pub rows: i64,
}

impl ParquetSummary {
    /// Read the footer of `path`, or of every `*.parquet` file below it when
    /// it is a directory
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let files = if path.is_dir() {
            let mut files = Vec::new();
            collect_parquet_files(path, &mut files)?;
            files.sort();
            files
        } else {
            vec![path.to_path_buf()]
        };

        let mut summary = Self::default();
        for file in files {
            let reader = open(&file)?;
            let metadata = reader.metadata();
            summary.rows += metadata.file_metadata().num_rows();
            summary.row_groups += metadata.num_row_groups();
            summary.files.push(file);
        }

        tracing::debug!(
            "Read {} parquet file(s) under {}: {} rows in {} row groups",
            summary.files.len(),
            path.display(),
            summary.rows,
            summary.row_groups
        );

        Ok(summary)
    }
}

/// Rows in the Parquet output at `path`, a file or a directory
pub fn parquet_row_count(path: impl AsRef<Path>) -> Result<i64> {
    Ok(ParquetSummary::read(path)?.rows)
}

fn open(path: &Path) -> Result<SerializedFileReader<File>> {
    let file = File::open(path)
        .map_err(|e| Error::Other(format!("Failed to open '{}': {e}", path.display())))?;
    Ok(SerializedFileReader::new(file)?)
}

fn collect_parquet_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_parquet_files(&path, files)?;
        } else if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(PARQUET_EXTENSION))
        {
            files.push(path);
        }
    }
    Ok(())
}
