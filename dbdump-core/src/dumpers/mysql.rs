//! MySQL dumps through `mysqldump`.
//!
//! Credentials are written to a temporary option file passed with
//! `--defaults-extra-file`, so the password never appears in the process
//! argument list.

use super::{DatabaseType, Dumper, require_db_name_and_host};
use crate::command::DumpCommand;
use crate::execution::execute;
use crate::options::{CommonOptions, DumpOptions};
use crate::runner::ProcessRunner;
use crate::security::{CredentialsFile, render_credentials_file};
use crate::tables::{TableFilter, TableList};
use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;
use zeroize::Zeroizing;

/// Default MySQL port
pub const DEFAULT_PORT: u16 = 3306;

/// Option Set and command builder for `mysqldump`.
///
/// # Example
/// ```rust
/// use dbdump_core::{CommonOptions, MySql};
/// use std::path::Path;
///
/// let command = MySql::new()
///     .with_db_name("dbname")
///     .with_user_name("username")
///     .with_password("password")
///     .dump_command(Path::new("dump.sql"), Path::new("credentials.txt"));
///
/// assert_eq!(
///     command.command_line(),
///     r#"'mysqldump' --defaults-extra-file="credentials.txt" --skip-comments --extended-insert --result-file="dump.sql" dbname"#
/// );
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MySql {
    #[serde(flatten)]
    options: DumpOptions,
    skip_comments: bool,
    use_extended_inserts: bool,
    single_transaction: bool,
    socket: Option<String>,
    gtid_purged: Option<String>,
    tables: TableFilter,
}

impl Default for MySql {
    fn default() -> Self {
        Self {
            options: DumpOptions::default(),
            skip_comments: true,
            use_extended_inserts: true,
            single_transaction: false,
            socket: None,
            gtid_purged: None,
            tables: TableFilter::All,
        }
    }
}

impl CommonOptions for MySql {
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

impl MySql {
    /// Creates a MySQL dumper with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps comments in the dump output.
    pub const fn dont_skip_comments(mut self) -> Self {
        self.skip_comments = false;
        self
    }

    /// Writes one `INSERT` per row instead of multi-row inserts.
    pub const fn dont_use_extended_inserts(mut self) -> Self {
        self.use_extended_inserts = false;
        self
    }

    /// Dumps inside a single transaction for a consistent snapshot.
    pub const fn use_single_transaction(mut self) -> Self {
        self.single_transaction = true;
        self
    }

    /// Connects through a local socket.
    pub fn with_socket(mut self, socket: impl Into<String>) -> Self {
        self.socket = Some(socket.into());
        self
    }

    /// Sets the `--set-gtid-purged` mode, e.g. `OFF`.
    pub fn with_gtid_purged(mut self, gtid_purged: impl Into<String>) -> Self {
        self.gtid_purged = Some(gtid_purged.into());
        self
    }

    /// Dumps only the given tables.
    ///
    /// # Errors
    /// Returns a conflicting parameter error if tables were excluded.
    pub fn include_tables(mut self, tables: impl Into<TableList>) -> Result<Self> {
        self.tables.include(tables.into())?;
        Ok(self)
    }

    /// Dumps every table except the given ones.
    ///
    /// # Errors
    /// Returns a conflicting parameter error if tables were included.
    pub fn exclude_tables(mut self, tables: impl Into<TableList>) -> Result<Self> {
        self.tables.exclude(tables.into())?;
        Ok(self)
    }

    /// Current table selection.
    pub const fn tables(&self) -> &TableFilter {
        &self.tables
    }

    /// Contents of the `[client]` option file for this dump.
    pub fn credentials_file_contents(&self) -> Zeroizing<String> {
        render_credentials_file(self.options.credentials(), self.host(), self.port())
    }

    /// Renders the `mysqldump` command.
    pub fn dump_command(&self, dump_file: &Path, credentials_file: &Path) -> DumpCommand {
        let db_name = self.db_name().unwrap_or_default();
        let mut command = DumpCommand::new(&self.options.binary("mysqldump"));

        command.push(format!(
            "--defaults-extra-file=\"{}\"",
            credentials_file.display()
        ));

        if self.skip_comments {
            command.push("--skip-comments");
        }

        command.push(if self.use_extended_inserts {
            "--extended-insert"
        } else {
            "--skip-extended-insert"
        });

        if self.single_transaction {
            command.push("--single-transaction");
        }

        if let Some(socket) = &self.socket {
            command.push(format!("--socket={}", socket));
        }

        for table in self.tables.excluded() {
            command.push(format!("--ignore-table={}.{}", db_name, table));
        }

        if let Some(gtid_purged) = &self.gtid_purged {
            command.push(format!("--set-gtid-purged={}", gtid_purged));
        }

        for option in self.extra_options() {
            command.push(option.clone());
        }

        command.push(format!("--result-file=\"{}\"", dump_file.display()));

        // `--databases <name>` among the extra options already names it
        if !self.options.db_name_from_extra_option() {
            command.push(db_name);
        }

        let included = self.tables.included();
        if !included.is_empty() {
            command.push(format!("--tables {}", included.join(" ")));
        }

        command
    }
}

#[async_trait]
impl Dumper for MySql {
    fn database_type(&self) -> DatabaseType {
        DatabaseType::MySql
    }

    fn validate(&self) -> Result<()> {
        require_db_name_and_host(self)
    }

    fn default_dump_file(&self) -> Option<PathBuf> {
        self.db_name().map(|name| PathBuf::from(format!("{}.sql", name)))
    }

    async fn dump_with(&self, runner: &dyn ProcessRunner) -> Result<PathBuf> {
        self.validate()?;
        let dump_file = self.resolve_dump_file()?;
        info!(
            "Starting {} dump to {}",
            self.database_type(),
            dump_file.display()
        );

        let credentials_file = CredentialsFile::create(&self.credentials_file_contents())?;
        let command = self.dump_command(&dump_file, credentials_file.path());
        let result = execute(&command, self.timeout(), runner).await;
        credentials_file.close();

        result?;
        info!("Finished {} dump to {}", self.database_type(), dump_file.display());
        Ok(dump_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dumper() -> MySql {
        MySql::new()
            .with_db_name("dbname")
            .with_user_name("username")
            .with_password("password")
    }

    fn render(dumper: &MySql) -> String {
        dumper
            .dump_command(Path::new("dump.sql"), Path::new("credentials.txt"))
            .command_line()
    }

    #[test]
    fn test_defaults() {
        let dumper = MySql::new();
        assert_eq!(dumper.host(), "localhost");
        assert_eq!(dumper.port(), Some(3306));
        assert_eq!(dumper.tables(), &TableFilter::All);
    }

    #[test]
    fn test_password_not_in_command() {
        let command = dumper().dump_command(Path::new("dump.sql"), Path::new("c.cnf"));
        assert!(!command.command_line().contains("password"));
    }

    #[test]
    fn test_single_transaction_and_socket() {
        let dumper = dumper().use_single_transaction().with_socket("1234");
        assert_eq!(
            render(&dumper),
            r#"'mysqldump' --defaults-extra-file="credentials.txt" --skip-comments --extended-insert --single-transaction --socket=1234 --result-file="dump.sql" dbname"#
        );
    }

    #[test]
    fn test_include_tables_after_db_name() {
        let dumper = dumper().include_tables(["tb1", "tb2", "tb3"]).unwrap();
        assert!(render(&dumper).ends_with(r#"--result-file="dump.sql" dbname --tables tb1 tb2 tb3"#));
    }

    #[test]
    fn test_custom_port_in_credentials_file() {
        let contents = dumper().with_host("hostname").with_port(3307).credentials_file_contents();
        assert!(contents.contains("host = 'hostname'"));
        assert!(contents.contains("port = '3307'"));
    }

    #[test]
    fn test_validate_requires_db_name() {
        let err = MySql::new().validate().unwrap_err();
        assert!(matches!(err, crate::error::DumpError::EmptyParameter { parameter: "db_name" }));
    }

    #[test]
    fn test_validate_requires_host() {
        let err = dumper().with_host("").validate().unwrap_err();
        assert!(matches!(err, crate::error::DumpError::EmptyParameter { parameter: "host" }));
    }

    #[test]
    fn test_deserialize_config() {
        let dumper: MySql = serde_json::from_str(
            r#"{"db_name": "shop", "port": 3307, "single_transaction": true, "tables": {"exclude": ["logs"]}}"#,
        )
        .unwrap();
        assert_eq!(dumper.db_name(), Some("shop"));
        assert_eq!(dumper.port(), Some(3307));
        assert!(dumper.skip_comments);
        assert_eq!(dumper.tables().excluded(), ["logs"]);
    }
}
