//! MongoDB dumps through `mongodump --archive`.

use super::{DatabaseType, Dumper, require_db_name_and_host};
use crate::command::{DumpCommand, shell_quote};
use crate::execution::execute;
use crate::options::{CommonOptions, DumpOptions};
use crate::runner::ProcessRunner;
use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Default MongoDB port
pub const DEFAULT_PORT: u16 = 27017;

/// Option Set and command builder for `mongodump`.
///
/// # Example
/// ```rust
/// use dbdump_core::{CommonOptions, MongoDb};
/// use std::path::Path;
///
/// let command = MongoDb::new()
///     .with_db_name("dbname")
///     .dump_command(Path::new("dbname.gz"));
///
/// assert_eq!(
///     command.command_line(),
///     "'mongodump' --db dbname --archive=dbname.gz --host localhost --port 27017"
/// );
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MongoDb {
    #[serde(flatten)]
    options: DumpOptions,
    collection: Option<String>,
    enable_compression: bool,
    authentication_database: Option<String>,
}

impl CommonOptions for MongoDb {
    fn options(&self) -> &DumpOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut DumpOptions {
        &mut self.options
    }

    fn default_port(&self) -> Option<u16> {
        Some(DEFAULT_PORT)
    }
}

impl MongoDb {
    /// Creates a MongoDB dumper with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Dumps a single collection.
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    /// Gzip-compresses the archive.
    pub const fn enable_compression(mut self) -> Self {
        self.enable_compression = true;
        self
    }

    /// Database holding the user's credentials.
    pub fn with_authentication_database(mut self, database: impl Into<String>) -> Self {
        self.authentication_database = Some(database.into());
        self
    }

    /// Renders the `mongodump` command.
    pub fn dump_command(&self, dump_file: &Path) -> DumpCommand {
        let mut command = DumpCommand::new(&self.options.binary("mongodump"));
        command.push(format!("--db {}", self.db_name().unwrap_or_default()));
        command.push(format!("--archive={}", dump_file.display()));

        let credentials = self.options.credentials();
        if let Some(user_name) = credentials.username() {
            command.push(format!("--username {}", shell_quote(user_name)));
        }
        if let Some(password) = credentials.password() {
            command.push_secret("--password", password);
        }

        if !self.host().is_empty() {
            command.push(format!("--host {}", self.host()));
        }
        if let Some(port) = self.port() {
            command.push(format!("--port {}", port));
        }
        if let Some(collection) = &self.collection {
            command.push(format!("--collection {}", collection));
        }
        if let Some(database) = self
            .authentication_database
            .as_deref()
            .filter(|db| !db.is_empty())
        {
            command.push(format!("--authenticationDatabase {}", database));
        }
        if self.enable_compression {
            command.push("--gzip");
        }

        command
    }
}

#[async_trait]
impl Dumper for MongoDb {
    fn database_type(&self) -> DatabaseType {
        DatabaseType::MongoDb
    }

    fn validate(&self) -> Result<()> {
        require_db_name_and_host(self)
    }

    fn default_dump_file(&self) -> Option<PathBuf> {
        self.db_name().map(|name| PathBuf::from(format!("{}.gz", name)))
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
