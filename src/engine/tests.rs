//! Tests for engine module

use super::*;
use crate::engine::recording::RecordingEngine;
use std::path::PathBuf;

// ============================================================================
// Selection
// ============================================================================

#[test]
fn test_connect_cli_bootstrap_failure() {
    let config = EngineConfig {
        engine: EngineKind::Cli,
        cli_path: PathBuf::from("/nonexistent/duckdb"),
        threads: Some(2),
        ..EngineConfig::default()
    };

    let err = connect(&config).err().unwrap();

    assert_eq!(err.phase(), Some(EnginePhase::Bootstrap));
    assert!(err.to_string().contains("SET threads TO 2"));
}

#[test]
fn test_connect_cli_without_bootstrap() {
    let config = EngineConfig {
        engine: EngineKind::Cli,
        cli_path: PathBuf::from("/nonexistent/duckdb"),
        ..EngineConfig::default()
    };

    let engine = connect(&config).unwrap();
    assert_eq!(engine.name(), "cli");
}

#[cfg(feature = "native")]
#[test]
fn test_connect_native_runs_bootstrap() {
    let config = EngineConfig {
        threads: Some(2),
        settings: vec!["SET enable_progress_bar = false".to_string()],
        ..EngineConfig::default()
    };

    let engine = connect(&config).unwrap();

    assert_eq!(engine.name(), "native");
    let rows = engine
        .query("SELECT current_setting('threads'), current_setting('enable_progress_bar')")
        .unwrap();
    assert_eq!(rows, vec![vec!["2".to_string(), "false".to_string()]]);
    assert!(engine.version().unwrap().starts_with('v'));
}

#[cfg(feature = "native")]
#[test]
fn test_connect_native_bad_setting() {
    let config = EngineConfig {
        engine: EngineKind::Native,
        settings: vec!["SET no_such_setting = 1".to_string()],
        ..EngineConfig::default()
    };

    let err = connect(&config).err().unwrap();
    assert_eq!(err.phase(), Some(EnginePhase::Bootstrap));
}

#[cfg(not(feature = "native"))]
#[test]
fn test_connect_native_not_compiled() {
    let config = EngineConfig {
        engine: EngineKind::Native,
        ..EngineConfig::default()
    };

    let err = connect(&config).err().unwrap();
    assert!(matches!(err, Error::Config { .. }));
}

// ============================================================================
// Trait
// ============================================================================

#[test]
fn test_boxed_engine_delegates() {
    let engine: Box<RecordingEngine> = Box::new(RecordingEngine::new());

    engine.execute("SELECT 1").unwrap();
    assert!(engine.query("SELECT 2").unwrap().is_empty());
    assert_eq!(engine.name(), "recording");
    assert_eq!(engine.statements(), vec!["SELECT 1", "SELECT 2"]);
}

#[test]
fn test_default_version_without_rows() {
    struct Silent;

    impl Engine for Silent {
        fn name(&self) -> &'static str {
            "silent"
        }

        fn execute(&self, _sql: &str) -> Result<()> {
            Ok(())
        }

        fn query(&self, _sql: &str) -> Result<Vec<Vec<String>>> {
            Ok(Vec::new())
        }
    }

    assert!(Silent.version().is_err());
}
