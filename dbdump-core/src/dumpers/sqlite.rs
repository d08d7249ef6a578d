//! SQLite dumps through the `sqlite3` shell's `.dump` command.
//!
//! The dump runs inside `BEGIN IMMEDIATE` so writers are held off while
//! the file is read.

use super::{DatabaseType, Dumper};
use crate::command::{DumpCommand, shell_quote};
use crate::execution::execute;
use crate::options::{CommonOptions, DumpOptions};
use crate::runner::ProcessRunner;
use crate::{Result, error::DumpError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Script fed to `sqlite3` on standard input.
const DUMP_SCRIPT: &str = "BEGIN IMMEDIATE;\n.dump";

/// Option Set and command builder for `sqlite3`.
///
/// The database name is the path of the database file. Host, port and
/// credentials are ignored.
///
/// # Example
/// ```rust
/// use dbdump_core::{CommonOptions, Sqlite};
/// use std::path::Path;
///
/// let command = Sqlite::new()
///     .with_db_name("/path/to/dbname.sqlite")
///     .with_dump_binary_path("/usr/bin")
///     .dump_command(Path::new("/save/to/dump.sql"));
///
/// assert_eq!(
///     command.command_line(),
///     "echo 'BEGIN IMMEDIATE;\n.dump' | '/usr/bin/sqlite3' --bail '/path/to/dbname.sqlite' >'/save/to/dump.sql'"
/// );
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Sqlite {
    #[serde(flatten)]
    options: DumpOptions,
}

impl CommonOptions for Sqlite {
    fn options(&self) -> &DumpOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut DumpOptions {
        &mut self.options
    }

    fn default_port(&self) -> Option<u16> {
        None
    }
}

impl Sqlite {
    /// Creates a SQLite dumper with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders the `sqlite3` pipeline.
    pub fn dump_command(&self, dump_file: &Path) -> DumpCommand {
        DumpCommand::from_line(format!(
            "echo {} | {} --bail {} >{}",
            shell_quote(DUMP_SCRIPT),
            shell_quote(&self.options.binary("sqlite3")),
            shell_quote(self.db_name().unwrap_or_default()),
            shell_quote(&dump_file.display().to_string()),
        ))
    }
}

#[async_trait]
impl Dumper for Sqlite {
    fn database_type(&self) -> DatabaseType {
        DatabaseType::Sqlite
    }

    fn validate(&self) -> Result<()> {
        if self.db_name().is_none() {
            return Err(DumpError::empty_parameter("db_name"));
        }
        self.resolve_dump_file().map(|_| ())
    }

    fn default_dump_file(&self) -> Option<PathBuf> {
        None
    }

    async fn dump_with(&self, runner: &dyn ProcessRunner) -> Result<PathBuf> {
        self.validate()?;
        let dump_file = self.resolve_dump_file()?;
        info!(
            "Starting {} dump to {}",
            self.database_type(),
            dump_file.display()
        );

        execute(&self.dump_command(&dump_file), self.timeout(), runner).await?;

        info!("Finished {} dump to {}", self.database_type(), dump_file.display());
        Ok(dump_file)
    }
}
