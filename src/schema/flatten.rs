//! Introspection and STRUCT flattening through the engine
//!
//! Nested types are expanded by asking the engine itself: a scratch table
//! with a single column of the STRUCT type is created, `SELECT C1.*` is
//! described to list its fields, and the table is dropped again.

use super::types::{ColumnDesc, TableDescription};
use crate::engine::Engine;
use crate::error::{EnginePhase, Error, Result, ResultExt};
use crate::param::quote_ident;
use std::sync::atomic::{AtomicU64, Ordering};

const STRUCT_COLUMN: &str = "C1";
const FLATTENED_ALIAS: &str = "fileconv_flat";

static SCRATCH_SEQ: AtomicU64 = AtomicU64::new(0);

/// Describe a table name or a query
pub fn describe(engine: &dyn Engine, table_or_query: &str) -> Result<TableDescription> {
    let sql = format!("SELECT column_name, column_type FROM (DESCRIBE {table_or_query})");
    tracing::debug!("Executing query: {}", sql);

    let rows = engine.query(&sql).phase(EnginePhase::Introspect, &sql)?;

    rows.into_iter()
        .map(|row| match <[String; 2]>::try_from(row) {
            Ok([name, column_type]) => Ok(ColumnDesc::new(name, column_type)),
            Err(row) => Err(Error::engine(
                EnginePhase::Introspect,
                &sql,
                Error::Other(format!("expected 2 columns, got {}", row.len())),
            )),
        })
        .collect()
}

// ============================================================================
// Scratch Tables
// ============================================================================

/// Engine table that is dropped when the guard goes out of scope.
///
/// Drop failures are logged and never replace the outcome of the work
/// done with the table.
pub struct ScratchTable<'a> {
    engine: &'a dyn Engine,
    name: String,
}

impl<'a> ScratchTable<'a> {
    /// `CREATE TABLE <tmp> (C1 <column_type>)`
    pub fn with_struct_column(engine: &'a dyn Engine, column_type: &str) -> Result<Self> {
        let name = scratch_name();
        let sql = format!("CREATE TABLE {name} ({STRUCT_COLUMN} {column_type})");
        Self::create(engine, name, &sql, EnginePhase::FlattenCreate)
    }

    /// `CREATE TABLE <tmp> AS <query>`
    pub fn from_query(engine: &'a dyn Engine, query: &str) -> Result<Self> {
        let name = scratch_name();
        let sql = format!("CREATE TABLE {name} AS {query}");
        Self::create(engine, name, &sql, EnginePhase::Read)
    }

    fn create(
        engine: &'a dyn Engine,
        name: String,
        sql: &str,
        phase: EnginePhase,
    ) -> Result<Self> {
        tracing::debug!("Executing statement: {}", sql);
        engine.execute(sql).phase(phase, sql)?;
        Ok(Self { engine, name })
    }

    /// Table name in the engine
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for ScratchTable<'_> {
    fn drop(&mut self) {
        let sql = format!("DROP TABLE IF EXISTS {}", self.name);
        tracing::debug!("Executing statement: {}", sql);

        if let Err(e) = self.engine.execute(&sql) {
            let err = Error::ResourceCleanup {
                table: self.name.clone(),
                message: Error::engine(EnginePhase::FlattenDrop, &sql, e).to_string(),
            };
            tracing::warn!("{}", err);
        }
    }
}

fn scratch_name() -> String {
    let seq = SCRATCH_SEQ.fetch_add(1, Ordering::Relaxed);
    let nanos = chrono::Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_default()
        .unsigned_abs();
    format!("fileconv_tmp_{seq}_{nanos}")
}

// ============================================================================
// Flattening
// ============================================================================

/// Leaf columns of a STRUCT column, named by their path joined with `_`.
///
/// `a2 STRUCT(b1 VARCHAR, b2 STRUCT(c1 BIGINT))` gives
/// `[a2_b1 VARCHAR, a2_b2_c1 BIGINT]`.
pub fn flatten_struct_column(
    engine: &dyn Engine,
    column: &ColumnDesc,
) -> Result<Vec<ColumnDesc>> {
    if !column.is_struct() {
        return Err(Error::NotStruct {
            column: column.name.clone(),
            column_type: column.column_type.clone(),
        });
    }

    let fields = {
        let table = ScratchTable::with_struct_column(engine, &column.column_type)?;
        describe(engine, &format!("SELECT {STRUCT_COLUMN}.* FROM {}", table.name()))?
    };

    let mut leaves = Vec::with_capacity(fields.len());
    for field in fields.columns() {
        let prefixed = ColumnDesc::new(
            format!("{}_{}", column.name, field.name),
            field.column_type.clone(),
        );
        if prefixed.is_struct() {
            leaves.extend(flatten_struct_column(engine, &prefixed)?);
        } else {
            leaves.push(prefixed);
        }
    }

    Ok(leaves)
}

/// Every column of `description` with STRUCT columns replaced by their leaves
pub fn flatten_columns(
    engine: &dyn Engine,
    description: &TableDescription,
) -> Result<Vec<ColumnDesc>> {
    let mut flattened = Vec::with_capacity(description.len());
    for column in description {
        if column.is_struct() {
            flattened.extend(flatten_struct_column(engine, column)?);
        } else {
            flattened.push(column.clone());
        }
    }
    Ok(flattened)
}

/// Query selecting every leaf of `table` under its flattened name.
///
/// Recursive unnest names each leaf after its own field, so leaves sharing a
/// field name collide; the flattened names are therefore bound by position
/// through a column alias list. Fails with `SchemaConsistency` when the
/// unnest yields a different number of columns than the flattened names.
pub fn flattened_select(engine: &dyn Engine, table: &str) -> Result<String> {
    let description = describe(engine, table)?;
    let flattened = flatten_columns(engine, &description)?;

    let unnested_query = format!("SELECT {} FROM {table}", description.unnested_projection());
    let unnested = describe(engine, &unnested_query)?;

    if unnested.len() != flattened.len() {
        return Err(Error::SchemaConsistency {
            unnested: unnested.len(),
            flattened: flattened.len(),
        });
    }

    let aliases = flattened
        .iter()
        .map(|f| quote_ident(&f.name))
        .collect::<Vec<_>>()
        .join(",");

    Ok(format!(
        "SELECT * FROM ({unnested_query}) AS {FLATTENED_ALIAS}({aliases})"
    ))
}
