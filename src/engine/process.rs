//! External `duckdb` executable engine
//!
//! Each call starts `duckdb <database> -json -bail`, writes the statements to
//! stdin and parses the JSON rows printed on stdout. Session settings do not
//! survive between processes, so the bootstrap statements are replayed in
//! front of every script and the database always lives in a file.

use super::Engine;
use crate::config::EngineConfig;
use crate::error::{Error, Result};
use serde_json::{Map, Value};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::TempDir;

const SCRATCH_DATABASE: &str = "scratch.duckdb";

type JsonRows = Vec<Map<String, Value>>;

/// DuckDB reached through its command line shell
pub struct ProcessEngine {
    cli_path: PathBuf,
    database: PathBuf,
    preamble: Vec<String>,
    /// Holds the scratch database when none was configured
    _scratch: Option<TempDir>,
}

impl ProcessEngine {
    /// Prepare an engine for `config`. No process is started yet.
    pub fn open(config: &EngineConfig) -> Result<Self> {
        let (database, scratch) = match &config.database {
            Some(path) => (path.clone(), None),
            None => {
                let dir = tempfile::tempdir()?;
                (dir.path().join(SCRATCH_DATABASE), Some(dir))
            }
        };

        Ok(Self {
            cli_path: config.cli_path.clone(),
            database,
            preamble: config.bootstrap_statements(),
            _scratch: scratch,
        })
    }

    /// Whether `cli_path --version` runs successfully
    pub fn probe(cli_path: &Path) -> bool {
        Command::new(cli_path)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok_and(|status| status.success())
    }

    /// Database file the shell operates on
    pub fn database(&self) -> &Path {
        &self.database
    }

    fn script(&self, sql: &str) -> String {
        let mut script = String::new();
        for statement in &self.preamble {
            script.push_str(statement);
            script.push_str(";\n");
        }
        script.push_str(sql.trim_end().trim_end_matches(';'));
        script.push_str(";\n");
        script
    }

    fn run(&self, sql: &str) -> Result<String> {
        let mut child = Command::new(&self.cli_path)
            .arg(&self.database)
            .arg("-json")
            .arg("-bail")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                Error::process(format!(
                    "Failed to start '{}': {e}",
                    self.cli_path.display()
                ))
            })?;

        // stdin is written from its own thread while stdout and stderr drain
        let script = self.script(sql);
        let stdin = child.stdin.take();
        let (written, output) = std::thread::scope(|scope| {
            let writer = scope.spawn(move || match stdin {
                Some(mut stdin) => stdin.write_all(script.as_bytes()),
                None => Ok(()),
            });
            let output = child.wait_with_output();
            (writer.join(), output)
        });
        let output = output?;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if !output.status.success() || !stderr.is_empty() {
            let message = if stderr.is_empty() {
                format!("exited with {}", output.status)
            } else {
                stderr
            };
            return Err(Error::process(message));
        }

        written
            .map_err(|_| Error::process("stdin writer thread panicked"))?
            .map_err(|e| Error::process(format!("Failed to write statements: {e}")))?;

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Engine for ProcessEngine {
    fn name(&self) -> &'static str {
        "cli"
    }

    fn execute(&self, sql: &str) -> Result<()> {
        self.run(sql)?;
        Ok(())
    }

    fn query(&self, sql: &str) -> Result<Vec<Vec<String>>> {
        let stdout = self.run(sql)?;
        parse_json_rows(&stdout)
    }
}

/// Parse the `-json` output of the shell.
///
/// Each statement that returns rows prints one JSON array of objects; the
/// rows of the last one are returned. Empty output means no rows.
fn parse_json_rows(stdout: &str) -> Result<Vec<Vec<String>>> {
    let mut last: Option<JsonRows> = None;
    for batch in serde_json::Deserializer::from_str(stdout).into_iter::<JsonRows>() {
        last = Some(batch?);
    }

    Ok(last
        .unwrap_or_default()
        .into_iter()
        .map(|object| object.into_iter().map(|(_, v)| json_to_string(v)).collect())
        .collect())
}

fn json_to_string(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    }
}
