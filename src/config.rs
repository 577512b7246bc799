//! Engine configuration
//!
//! Loaded from an optional YAML file and overridden by command line flags.
//!
//! ```yaml
//! engine: native        # auto | native | cli
//! database: work.duckdb # omitted: in-memory / scratch file
//! threads: 4
//! memory_limit: 2GB
//! settings:
//!   - SET preserve_insertion_order = false
//! extensions:
//!   - httpfs
//! ```

use crate::error::{Error, Result, ResultExt};
use crate::param::quote_literal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

// ============================================================================
// Engine Kind
// ============================================================================

/// How the DuckDB engine is reached
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// Native when compiled in, otherwise the external executable
    #[default]
    Auto,
    /// In-process DuckDB
    Native,
    /// External `duckdb` executable
    Cli,
}

impl EngineKind {
    /// Name used in config files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineKind::Auto => "auto",
            EngineKind::Native => "native",
            EngineKind::Cli => "cli",
        }
    }
}

impl FromStr for EngineKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(EngineKind::Auto),
            "native" => Ok(EngineKind::Native),
            "cli" => Ok(EngineKind::Cli),
            _ => Err(Error::invalid_value("engine", s)),
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Engine Config
// ============================================================================

/// Engine selection and session setup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Engine implementation
    #[serde(default)]
    pub engine: EngineKind,

    /// Database file, in-memory (or a scratch file for `cli`) when absent
    #[serde(default)]
    pub database: Option<PathBuf>,

    /// Executable used by the `cli` engine
    #[serde(default = "default_cli_path")]
    pub cli_path: PathBuf,

    /// Worker threads of the engine
    #[serde(default)]
    pub threads: Option<u32>,

    /// Memory limit, e.g. `4GB`
    #[serde(default)]
    pub memory_limit: Option<String>,

    /// Raw statements run after connecting
    #[serde(default)]
    pub settings: Vec<String>,

    /// Extensions to install and load
    #[serde(default)]
    pub extensions: Vec<String>,
}

fn default_cli_path() -> PathBuf {
    PathBuf::from("duckdb")
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            engine: EngineKind::default(),
            database: None,
            cli_path: default_cli_path(),
            threads: None,
            memory_limit: None,
            settings: Vec::new(),
            extensions: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// Parse a YAML document
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config '{}'", path.display()))?;
        Self::from_yaml(&content)
    }

    fn validate(&self) -> Result<()> {
        if self.threads == Some(0) {
            return Err(Error::invalid_value("threads", "0"));
        }
        if self.cli_path.as_os_str().is_empty() {
            return Err(Error::config("cli_path must not be empty"));
        }
        Ok(())
    }

    /// Statements run right after the engine is opened.
    ///
    /// Order: threads, memory limit, raw settings, extension install/load.
    pub fn bootstrap_statements(&self) -> Vec<String> {
        let mut statements = Vec::new();

        if let Some(threads) = self.threads {
            statements.push(format!("SET threads TO {threads}"));
        }
        if let Some(limit) = &self.memory_limit {
            statements.push(format!("SET memory_limit = {}", quote_literal(limit)));
        }
        statements.extend(self.settings.iter().cloned());
        for extension in &self.extensions {
            statements.push(format!("INSTALL {}", quote_literal(extension)));
            statements.push(format!("LOAD {}", quote_literal(extension)));
        }

        statements
    }
}
