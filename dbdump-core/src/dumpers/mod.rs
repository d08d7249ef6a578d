//! Dumper trait and factory for the supported database kinds.
//!
//! Each database kind renders its own native dump command; validation,
//! output path resolution and execution follow the same sequence:
//! validate, resolve the dump file, render, run, classify.

pub mod mongodb;
pub mod mysql;
pub mod sqlite;

use crate::options::CommonOptions;
use crate::runner::{ProcessRunner, ShellRunner};
use crate::{Result, error::DumpError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use mongodb::MongoDb;
pub use mysql::MySql;
pub use sqlite::Sqlite;

/// Supported database kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseType {
    /// MySQL and MariaDB through `mysqldump`
    MySql,
    /// MongoDB through `mongodump`
    MongoDb,
    /// SQLite through the `sqlite3` shell
    Sqlite,
}

impl std::fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::MySql => "MySQL",
            Self::MongoDb => "MongoDB",
            Self::Sqlite => "SQLite",
        })
    }
}

impl std::str::FromStr for DatabaseType {
    type Err = DumpError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(Self::MySql),
            "mongodb" | "mongo" => Ok(Self::MongoDb),
            "sqlite" | "sqlite3" => Ok(Self::Sqlite),
            other => Err(DumpError::configuration(format!(
                "unsupported database type: {}",
                other
            ))),
        }
    }
}

/// A database dumper.
///
/// # Object Safety
/// This trait is object-safe, allowing for dynamic dispatch through
/// `Box<dyn Dumper>`.
#[async_trait]
pub trait Dumper: CommonOptions + Send + Sync {
    /// Database kind this dumper handles
    fn database_type(&self) -> DatabaseType;

    /// Checks required options before anything touches the filesystem.
    ///
    /// # Errors
    /// Returns a configuration error naming the missing option.
    fn validate(&self) -> Result<()>;

    /// Output path used when no dump file is set.
    fn default_dump_file(&self) -> Option<PathBuf>;

    /// Runs the dump through `runner`.
    ///
    /// # Returns
    /// The path of the dump file.
    ///
    /// # Errors
    /// Returns a configuration error before running anything, or an
    /// execution failure from the dump process.
    async fn dump_with(&self, runner: &dyn ProcessRunner) -> Result<PathBuf>;

    /// Explicit dump file, or the derived default.
    ///
    /// # Errors
    /// Returns an empty parameter error if neither is available.
    fn resolve_dump_file(&self) -> Result<PathBuf> {
        self.dump_file()
            .filter(|path| !path.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .or_else(|| self.default_dump_file())
            .ok_or_else(|| DumpError::empty_parameter("dump_file"))
    }

    /// Runs the dump through `sh`.
    ///
    /// # Errors
    /// See [`Dumper::dump_with`].
    async fn dump(&self) -> Result<PathBuf> {
        self.dump_with(&ShellRunner::default()).await
    }

    /// Sets the dump file to `path`, then dumps through `runner`.
    ///
    /// # Errors
    /// See [`Dumper::dump_with`].
    async fn dump_to_file_with(
        &mut self,
        path: &Path,
        runner: &dyn ProcessRunner,
    ) -> Result<PathBuf> {
        self.options_mut().dump_file = Some(path.to_path_buf());
        self.dump_with(runner).await
    }

    /// Sets the dump file to `path`, then dumps through `sh`.
    ///
    /// # Errors
    /// See [`Dumper::dump_with`].
    async fn dump_to_file(&mut self, path: &Path) -> Result<PathBuf> {
        self.dump_to_file_with(path, &ShellRunner::default()).await
    }
}

/// Checks that a dumper's database name and host are set.
pub(crate) fn require_db_name_and_host(dumper: &dyn Dumper) -> Result<()> {
    if dumper.db_name().is_none() {
        return Err(DumpError::empty_parameter("db_name"));
    }
    if dumper.host().is_empty() {
        return Err(DumpError::empty_parameter("host"));
    }
    Ok(())
}

/// Creates a dumper with default options for `database_type`.
///
/// # Example
/// ```rust
/// use dbdump_core::{CommonOptions, DatabaseType, Dumper, create_dumper};
///
/// let mut dumper = create_dumper(DatabaseType::MongoDb);
/// dumper.options_mut().db_name = Some("events".to_string());
/// assert_eq!(dumper.port(), Some(27017));
/// assert!(dumper.validate().is_ok());
/// ```
pub fn create_dumper(database_type: DatabaseType) -> Box<dyn Dumper> {
    match database_type {
        DatabaseType::MySql => Box::new(MySql::new()),
        DatabaseType::MongoDb => Box::new(MongoDb::new()),
        DatabaseType::Sqlite => Box::new(Sqlite::new()),
    }
}
