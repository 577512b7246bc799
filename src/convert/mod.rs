//! Conversion orchestrator
//!
//! Turns rendered parameter fragments into the statements sent to the
//! engine.
//!
//! # Overview
//!
//! A conversion is a single
//! `COPY (SELECT * FROM read_<fmt>('<source>' <fragment>)) TO '<dest>' (<options>)`.
//! With JSON flattening the source is first imported into a scratch table and
//! the flattened select over that table becomes the `COPY` source. In
//! describe mode nothing is written and the detected schema is returned.

use crate::config::EngineConfig;
use crate::engine::{self, Engine};
use crate::error::{EnginePhase, Result, ResultExt};
use crate::param::{
    quote_literal, CsvReadParams, JsonReadParams, ParquetReadParams, ParquetWriteParams,
};
use crate::schema::{self, ScratchTable, TableDescription};
use std::time::Instant;

/// Result of a conversion call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The destination was written
    Converted,
    /// Describe mode: the schema the conversion would produce
    Described(TableDescription),
}

/// Runs conversions against one engine
pub struct Converter<E = Box<dyn Engine>> {
    engine: E,
}

impl Converter {
    /// Connect the engine selected by `config`
    pub fn connect(config: &EngineConfig) -> Result<Self> {
        Ok(Self::new(engine::connect(config)?))
    }
}

impl<E: Engine> Converter<E> {
    /// Converter running on `engine`
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    /// Engine the statements are sent to
    pub fn engine(&self) -> &E {
        &self.engine
    }

    // ========================================================================
    // CSV
    // ========================================================================

    /// Convert CSV file(s) matching `source` into Parquet at `dest`
    pub fn csv_to_parquet(
        &self,
        source: &str,
        dest: &str,
        write: &ParquetWriteParams,
        read: &CsvReadParams,
    ) -> Result<Outcome> {
        if read.describe() {
            return self.describe_csv(source, read).map(Outcome::Described);
        }

        let select = csv_select(source, read);
        self.copy(&select, source, dest, write)?;
        Ok(Outcome::Converted)
    }

    /// Schema detected for the CSV source, using the configured sample size
    pub fn describe_csv(&self, source: &str, read: &CsvReadParams) -> Result<TableDescription> {
        let query = with_sample(&csv_select(source, read), read.sample_size());
        schema::describe(&self.engine, &query)
    }

    // ========================================================================
    // JSON
    // ========================================================================

    /// Convert JSON file(s) matching `source` into Parquet at `dest`.
    ///
    /// With `flatten`, nested STRUCT columns become top level columns.
    pub fn json_to_parquet(
        &self,
        source: &str,
        dest: &str,
        write: &ParquetWriteParams,
        read: &JsonReadParams,
    ) -> Result<Outcome> {
        if read.describe() {
            return self.describe_json(source, read).map(Outcome::Described);
        }

        let select = json_select(source, read);
        if !read.flatten() {
            self.copy(&select, source, dest, write)?;
            return Ok(Outcome::Converted);
        }

        let imported = ScratchTable::from_query(&self.engine, &select)?;
        let flattened = schema::flattened_select(&self.engine, imported.name())?;
        self.copy(&flattened, source, dest, write)?;
        Ok(Outcome::Converted)
    }

    /// Schema detected for the JSON source, flattened when requested
    pub fn describe_json(&self, source: &str, read: &JsonReadParams) -> Result<TableDescription> {
        let query = with_sample(&json_select(source, read), read.sample_size());
        if !read.flatten() {
            return schema::describe(&self.engine, &query);
        }

        let imported = ScratchTable::from_query(&self.engine, &query)?;
        let flattened = schema::flattened_select(&self.engine, imported.name())?;
        schema::describe(&self.engine, &flattened)
    }

    // ========================================================================
    // Parquet
    // ========================================================================

    /// Schema of existing Parquet file(s)
    pub fn describe_parquet(
        &self,
        source: &str,
        read: &ParquetReadParams,
    ) -> Result<TableDescription> {
        let query = format!(
            "SELECT * FROM read_parquet({} {})",
            quote_literal(source),
            read.params()
        );
        schema::describe(&self.engine, &query)
    }

    fn copy(
        &self,
        select: &str,
        source: &str,
        dest: &str,
        write: &ParquetWriteParams,
    ) -> Result<()> {
        let sql = copy_statement(select, dest, write);
        tracing::info!("Converting {} to {}", source, dest);
        tracing::debug!("Executing statement: {}", sql);

        let start = Instant::now();
        self.engine.execute(&sql).phase(EnginePhase::Copy, &sql)?;

        tracing::info!("Wrote {} in {:.2}s", dest, start.elapsed().as_secs_f64());
        Ok(())
    }
}

fn csv_select(source: &str, read: &CsvReadParams) -> String {
    format!(
        "SELECT * FROM read_csv({} {})",
        quote_literal(source),
        read.params()
    )
}

fn json_select(source: &str, read: &JsonReadParams) -> String {
    format!(
        "SELECT * FROM read_json({} {})",
        quote_literal(source),
        read.params()
    )
}

/// Append `USING SAMPLE n`; sizes of zero or below read everything
fn with_sample(select: &str, sample_size: i64) -> String {
    if sample_size > 0 {
        format!("{select} USING SAMPLE {sample_size}")
    } else {
        select.to_string()
    }
}

fn copy_statement(select: &str, dest: &str, write: &ParquetWriteParams) -> String {
    format!(
        "COPY ({select}) TO {} {}",
        quote_literal(dest),
        write.params()
    )
}

#[cfg(test)]
mod tests;
