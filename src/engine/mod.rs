//! SQL engine abstraction
//!
//! Every conversion is expressed as SQL and handed to an [`Engine`].
//!
//! # Overview
//!
//! Two implementations exist:
//! - `NativeEngine` - in-process DuckDB through the `duckdb` crate (feature `native`)
//! - `ProcessEngine` - the external `duckdb` executable, fed on stdin
//!
//! [`connect`] picks one from an [`EngineConfig`] and runs its bootstrap
//! statements, so callers never branch on how the engine is reached.

#[cfg(feature = "native")]
mod native;
mod process;

#[cfg(feature = "native")]
pub use native::NativeEngine;
pub use process::ProcessEngine;

use crate::config::{EngineConfig, EngineKind};
use crate::error::{EnginePhase, Error, Result, ResultExt};

/// Capability set the converter needs from the SQL engine
pub trait Engine {
    /// Short name used in log lines
    fn name(&self) -> &'static str;

    /// Run one or more statements, discarding any result
    fn execute(&self, sql: &str) -> Result<()>;

    /// Run a query and return every row as strings, columns in select order.
    ///
    /// NULL values come back as empty strings.
    fn query(&self, sql: &str) -> Result<Vec<Vec<String>>>;

    /// Engine version string
    fn version(&self) -> Result<String> {
        let rows = self.query("SELECT version()")?;
        rows.into_iter()
            .next()
            .and_then(|row| row.into_iter().next())
            .ok_or_else(|| Error::Other("version() returned no rows".to_string()))
    }
}

impl<E: Engine + ?Sized> Engine for Box<E> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn execute(&self, sql: &str) -> Result<()> {
        (**self).execute(sql)
    }

    fn query(&self, sql: &str) -> Result<Vec<Vec<String>>> {
        (**self).query(sql)
    }

    fn version(&self) -> Result<String> {
        (**self).version()
    }
}

/// Open the engine selected by `config` and run its bootstrap statements
pub fn connect(config: &EngineConfig) -> Result<Box<dyn Engine>> {
    let engine = open(config)?;
    tracing::debug!("Using {} engine", engine.name());

    for statement in config.bootstrap_statements() {
        tracing::debug!("Executing bootstrap statement: {}", statement);
        engine
            .execute(&statement)
            .phase(EnginePhase::Bootstrap, &statement)?;
    }

    Ok(engine)
}

fn open(config: &EngineConfig) -> Result<Box<dyn Engine>> {
    match config.engine {
        EngineKind::Native => open_native(config),
        EngineKind::Cli => Ok(Box::new(ProcessEngine::open(config)?)),
        EngineKind::Auto => {
            if cfg!(feature = "native") {
                return open_native(config);
            }
            if ProcessEngine::probe(&config.cli_path) {
                return Ok(Box::new(ProcessEngine::open(config)?));
            }
            Err(Error::config(format!(
                "No DuckDB engine available: built without the native engine and '{}' could not be run",
                config.cli_path.display()
            )))
        }
    }
}

#[cfg(feature = "native")]
fn open_native(config: &EngineConfig) -> Result<Box<dyn Engine>> {
    Ok(Box::new(NativeEngine::open(config.database.as_deref())?))
}

#[cfg(not(feature = "native"))]
fn open_native(_config: &EngineConfig) -> Result<Box<dyn Engine>> {
    Err(Error::config(
        "The native engine is not compiled in; rebuild with the 'native' feature or use engine: cli",
    ))
}

#[cfg(test)]
pub(crate) mod recording;

#[cfg(test)]
mod tests;
