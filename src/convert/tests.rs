//! Tests for the conversion orchestrator

use super::*;
use crate::engine::recording::RecordingEngine;
use crate::error::Error;
use crate::param::{Columns, HivePartitionConfig, ParquetCompression};
use crate::schema::ColumnDesc;
use pretty_assertions::assert_eq;

fn nested_engine() -> RecordingEngine {
    RecordingEngine::new()
        .with_description(
            "unnest(",
            &[("a1", "VARCHAR"), ("b1", "BIGINT"), ("a3", "DOUBLE")],
        )
        .with_description(
            "(DESCRIBE fileconv_tmp_",
            &[
                ("a1", "VARCHAR"),
                ("a2", "STRUCT(b1 BIGINT)"),
                ("a3", "DOUBLE"),
            ],
        )
}

// ============================================================================
// CSV
// ============================================================================

#[test]
fn test_csv_to_parquet_defaults() {
    let converter = Converter::new(RecordingEngine::new());

    let outcome = converter
        .csv_to_parquet(
            "in.csv",
            "out.parquet",
            &ParquetWriteParams::new(),
            &CsvReadParams::new(),
        )
        .unwrap();

    assert_eq!(outcome, Outcome::Converted);
    assert_eq!(
        converter.engine().statements(),
        vec!["COPY (SELECT * FROM read_csv('in.csv' )) TO 'out.parquet' (FORMAT PARQUET)"]
    );
}

#[test]
fn test_csv_to_parquet_with_options() {
    let converter = Converter::new(RecordingEngine::new());
    let columns = Columns::parse(&["id:BIGINT", "name:VARCHAR"]).unwrap();
    let read = CsvReadParams::new()
        .with_header(true)
        .with_delim("|")
        .with_columns(columns);
    let write = ParquetWriteParams::new()
        .with_compression(ParquetCompression::Zstd)
        .with_hive_partition_config(HivePartitionConfig::new().with_partition_by(["name"]));

    converter
        .csv_to_parquet("data/*.csv", "out", &write, &read)
        .unwrap();

    assert_eq!(
        converter.engine().statements(),
        vec![
            "COPY (SELECT * FROM read_csv('data/*.csv' ,auto_detect = false,\
             columns = {'id': 'BIGINT','name': 'VARCHAR'},delim = '|',header = true)) \
             TO 'out' (FORMAT PARQUET,COMPRESSION 'zstd',PARTITION_BY (name))"
        ]
    );
}

#[test]
fn test_csv_paths_are_quoted() {
    let converter = Converter::new(RecordingEngine::new());

    converter
        .csv_to_parquet(
            "it's.csv",
            "o'out.parquet",
            &ParquetWriteParams::new(),
            &CsvReadParams::new(),
        )
        .unwrap();

    assert_eq!(
        converter.engine().statements(),
        vec!["COPY (SELECT * FROM read_csv('it''s.csv' )) TO 'o''out.parquet' (FORMAT PARQUET)"]
    );
}

#[test]
fn test_csv_copy_failure_is_tagged() {
    let converter = Converter::new(RecordingEngine::new().failing_on("COPY"));

    let err = converter
        .csv_to_parquet(
            "missing.csv",
            "out.parquet",
            &ParquetWriteParams::new(),
            &CsvReadParams::new(),
        )
        .unwrap_err();

    assert_eq!(err.phase(), Some(EnginePhase::Copy));
    assert!(err.to_string().contains("read_csv('missing.csv' )"));
}

#[test]
fn test_csv_describe_does_not_write() {
    let engine = RecordingEngine::new()
        .with_description("read_csv", &[("id", "BIGINT"), ("name", "VARCHAR")]);
    let converter = Converter::new(engine);
    let read = CsvReadParams::new().with_describe(true).with_sample_size(100);

    let outcome = converter
        .csv_to_parquet("in.csv", "out.parquet", &ParquetWriteParams::new(), &read)
        .unwrap();

    let Outcome::Described(description) = outcome else {
        panic!("expected a description");
    };
    assert_eq!(description.len(), 2);
    assert_eq!(
        converter.engine().statements(),
        vec![
            "SELECT column_name, column_type FROM (DESCRIBE \
             SELECT * FROM read_csv('in.csv' ,sample_size = 100) USING SAMPLE 100)"
        ]
    );
}

#[test]
fn test_describe_without_sample() {
    let converter = Converter::new(RecordingEngine::new());
    let read = CsvReadParams::new().with_sample_size(-1);

    converter.describe_csv("in.csv", &read).unwrap();

    let statements = converter.engine().statements();
    assert_eq!(statements.len(), 1);
    assert!(!statements[0].contains("USING SAMPLE"));
}

// ============================================================================
// JSON
// ============================================================================

#[test]
fn test_json_to_parquet() {
    let converter = Converter::new(RecordingEngine::new());
    let read = JsonReadParams::new().with_ignore_errors(true);

    converter
        .json_to_parquet("in.json", "out.parquet", &ParquetWriteParams::new(), &read)
        .unwrap();

    assert_eq!(
        converter.engine().statements(),
        vec![
            "COPY (SELECT * FROM read_json('in.json' ,ignore_errors = true)) \
             TO 'out.parquet' (FORMAT PARQUET)"
        ]
    );
}

#[test]
fn test_json_flatten() {
    let converter = Converter::new(nested_engine());
    let read = JsonReadParams::new().with_flatten(true);

    converter
        .json_to_parquet("in.json", "out.parquet", &ParquetWriteParams::new(), &read)
        .unwrap();

    let engine = converter.engine();
    let statements = engine.statements();

    let import = &statements[0];
    assert!(import.starts_with("CREATE TABLE fileconv_tmp_"));
    assert!(import.ends_with(" AS SELECT * FROM read_json('in.json' )"));
    let table = import
        .trim_start_matches("CREATE TABLE ")
        .split(' ')
        .next()
        .unwrap()
        .to_string();

    let copy = engine.matching("COPY");
    assert_eq!(
        copy,
        vec![format!(
            "COPY (SELECT * FROM (SELECT a1,unnest(a2, recursive := true),a3 FROM {table}) \
             AS fileconv_flat(\"a1\",\"a2_b1\",\"a3\")) \
             TO 'out.parquet' (FORMAT PARQUET)"
        )]
    );
    // imported table dropped after the copy
    assert_eq!(
        statements.last().unwrap(),
        &format!("DROP TABLE IF EXISTS {table}")
    );
    assert_eq!(engine.live_struct_tables(), 0);
}

#[test]
fn test_json_flatten_drops_import_on_copy_failure() {
    let converter = Converter::new(nested_engine().failing_on("COPY"));
    let read = JsonReadParams::new().with_flatten(true);

    let err = converter
        .json_to_parquet("in.json", "out.parquet", &ParquetWriteParams::new(), &read)
        .unwrap_err();

    assert_eq!(err.phase(), Some(EnginePhase::Copy));
    let drops = converter.engine().matching("DROP TABLE IF EXISTS");
    // struct scratch table and imported table
    assert_eq!(drops.len(), 2);
}

#[test]
fn test_json_flatten_import_failure() {
    let converter = Converter::new(RecordingEngine::new().failing_on("read_json"));
    let read = JsonReadParams::new().with_flatten(true);

    let err = converter
        .json_to_parquet("in.json", "out.parquet", &ParquetWriteParams::new(), &read)
        .unwrap_err();

    assert_eq!(err.phase(), Some(EnginePhase::Read));
    assert!(converter.engine().matching("COPY").is_empty());
    assert!(converter.engine().matching("DROP TABLE").is_empty());
}

#[test]
fn test_json_flatten_mismatch_aborts() {
    let engine = RecordingEngine::new()
        .with_description("unnest(", &[("a1", "VARCHAR")])
        .with_description(
            "(DESCRIBE fileconv_tmp_",
            &[("a1", "VARCHAR"), ("a2", "STRUCT(b1 BIGINT)")],
        );
    let converter = Converter::new(engine);
    let read = JsonReadParams::new().with_flatten(true);

    let err = converter
        .json_to_parquet("in.json", "out.parquet", &ParquetWriteParams::new(), &read)
        .unwrap_err();

    assert!(matches!(err, Error::SchemaConsistency { .. }));
    assert!(converter.engine().matching("COPY").is_empty());
    assert_eq!(converter.engine().matching("DROP TABLE").len(), 2);
}

#[test]
fn test_json_describe_flattened() {
    // the flattened select also contains `unnest(`, so it is scripted first
    let engine = RecordingEngine::new()
        .with_description(
            "AS fileconv_flat(",
            &[("a1", "VARCHAR"), ("a2_b1", "BIGINT"), ("a3", "DOUBLE")],
        )
        .with_description(
            "unnest(",
            &[("a1", "VARCHAR"), ("b1", "BIGINT"), ("a3", "DOUBLE")],
        )
        .with_description(
            "(DESCRIBE fileconv_tmp_",
            &[
                ("a1", "VARCHAR"),
                ("a2", "STRUCT(b1 BIGINT)"),
                ("a3", "DOUBLE"),
            ],
        );
    let converter = Converter::new(engine);
    let read = JsonReadParams::new().with_flatten(true).with_describe(true);

    let outcome = converter
        .json_to_parquet("in.json", "out.parquet", &ParquetWriteParams::new(), &read)
        .unwrap();

    let names: Vec<String> = match outcome {
        Outcome::Described(d) => d.iter().map(|c| c.name.clone()).collect(),
        Outcome::Converted => panic!("expected a description"),
    };
    assert_eq!(names, vec!["a1", "a2_b1", "a3"]);

    let statements = converter.engine().statements();
    assert!(statements[0].ends_with("read_json('in.json' ) USING SAMPLE 20480"));
    assert!(converter.engine().matching("COPY").is_empty());
}

// ============================================================================
// Parquet
// ============================================================================

#[test]
fn test_describe_parquet() {
    let engine =
        RecordingEngine::new().with_description("read_parquet", &[("id", "BIGINT")]);
    let converter = Converter::new(engine);
    let read = ParquetReadParams::new().with_hive_partitioning(true);

    let description = converter.describe_parquet("out/**/*.parquet", &read).unwrap();

    assert_eq!(description.columns(), &[ColumnDesc::new("id", "BIGINT")]);
    assert_eq!(
        converter.engine().statements(),
        vec![
            "SELECT column_name, column_type FROM (DESCRIBE \
             SELECT * FROM read_parquet('out/**/*.parquet' ,hive_partitioning = true))"
        ]
    );
}
