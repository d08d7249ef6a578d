//! Options shared by every dumper.
//!
//! [`DumpOptions`] holds the common Option Set shape. The [`CommonOptions`]
//! trait puts the fluent setters and the getters for those fields on every
//! dumper type.

use crate::security::Credentials;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Extra option prefix that names the database to dump.
const DATABASES_OPTION: &str = "--databases ";

/// Connection and behaviour settings common to all dumpers.
///
/// # Security
/// Credentials are never serialized; set them with
/// [`CommonOptions::with_user_name`] and [`CommonOptions::with_password`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DumpOptions {
    /// Database name, or the database file path for SQLite
    pub db_name: Option<String>,
    /// Database host address
    pub host: String,
    /// Port; `None` uses the dumper's default port
    pub port: Option<u16>,
    /// Directory of the dump binary, empty to resolve through `PATH`
    pub dump_binary_path: String,
    /// Explicit output path
    pub dump_file: Option<PathBuf>,
    /// Wall-clock limit for the dump process; `None` waits indefinitely
    pub timeout: Option<Duration>,
    /// Raw flags appended verbatim, in insertion order
    pub extra_options: Vec<String>,
    #[serde(skip)]
    pub(crate) credentials: Credentials,
    #[serde(skip)]
    pub(crate) db_name_from_extra_option: bool,
}

impl Default for DumpOptions {
    fn default() -> Self {
        Self {
            db_name: None,
            host: "localhost".to_string(),
            port: None,
            dump_binary_path: String::new(),
            dump_file: None,
            timeout: None,
            extra_options: Vec::new(),
            credentials: Credentials::default(),
            db_name_from_extra_option: false,
        }
    }
}

impl DumpOptions {
    /// Path of `binary` inside the configured binary directory.
    pub fn binary(&self, binary: &str) -> String {
        let mut path = self.dump_binary_path.clone();
        if !path.is_empty() && !path.ends_with('/') {
            path.push('/');
        }
        path.push_str(binary);
        path
    }

    /// Non-empty database name, if any.
    pub fn db_name(&self) -> Option<&str> {
        self.db_name.as_deref().filter(|name| !name.is_empty())
    }

    /// Credentials used by the dump.
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Whether the database name came from a `--databases` extra option.
    pub const fn db_name_from_extra_option(&self) -> bool {
        self.db_name_from_extra_option
    }

    pub(crate) fn add_extra_option(&mut self, option: String) {
        // the first name after the flag is the one table exclusions qualify
        if let Some(name) = option
            .strip_prefix(DATABASES_OPTION)
            .and_then(|names| names.split_whitespace().next())
        {
            self.db_name = Some(name.to_string());
            self.db_name_from_extra_option = true;
        }
        self.extra_options.push(option);
    }
}

/// Fluent setters and getters shared by every dumper.
///
/// # Example
/// ```rust
/// use dbdump_core::{CommonOptions, MySql};
///
/// let dumper = MySql::new()
///     .with_db_name("shop")
///     .with_host("db.internal")
///     .with_user_name("backup");
/// assert_eq!(dumper.db_name(), Some("shop"));
/// assert_eq!(dumper.port(), Some(3306));
/// ```
pub trait CommonOptions {
    /// Shared options of this dumper.
    fn options(&self) -> &DumpOptions;

    /// Mutable shared options of this dumper.
    fn options_mut(&mut self) -> &mut DumpOptions;

    /// Port used when none is configured.
    fn default_port(&self) -> Option<u16>;

    /// Sets the database name (a file path for SQLite).
    fn with_db_name(mut self, db_name: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        self.options_mut().db_name = Some(db_name.into());
        self
    }

    /// Sets the database host.
    fn with_host(mut self, host: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        self.options_mut().host = host.into();
        self
    }

    /// Sets the database port.
    fn with_port(mut self, port: u16) -> Self
    where
        Self: Sized,
    {
        self.options_mut().port = Some(port);
        self
    }

    /// Sets the user name.
    fn with_user_name(mut self, user_name: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        self.options_mut().credentials.set_username(user_name.into());
        self
    }

    /// Sets the password.
    fn with_password(mut self, password: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        self.options_mut().credentials.set_password(password.into());
        self
    }

    /// Sets the directory containing the dump binary.
    fn with_dump_binary_path(mut self, path: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        self.options_mut().dump_binary_path = path.into();
        self
    }

    /// Sets the output path.
    fn with_dump_file(mut self, path: impl Into<PathBuf>) -> Self
    where
        Self: Sized,
    {
        self.options_mut().dump_file = Some(path.into());
        self
    }

    /// Sets the wall-clock limit for the dump process.
    fn with_timeout(mut self, timeout: Duration) -> Self
    where
        Self: Sized,
    {
        self.options_mut().timeout = Some(timeout);
        self
    }

    /// Appends a raw flag to the command.
    ///
    /// `--databases <name>` also sets the database name; the most recent
    /// source of the name wins.
    fn add_extra_option(mut self, option: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        self.options_mut().add_extra_option(option.into());
        self
    }

    /// Database name, from the setter or a `--databases` extra option.
    fn db_name(&self) -> Option<&str> {
        self.options().db_name()
    }

    /// Database host.
    fn host(&self) -> &str {
        &self.options().host
    }

    /// Configured port, or the dumper's default.
    fn port(&self) -> Option<u16> {
        self.options().port.or_else(|| self.default_port())
    }

    /// Explicit output path, if set.
    fn dump_file(&self) -> Option<&Path> {
        self.options().dump_file.as_deref()
    }

    /// Wall-clock limit for the dump process.
    fn timeout(&self) -> Option<Duration> {
        self.options().timeout
    }

    /// Raw flags in insertion order.
    fn extra_options(&self) -> &[String] {
        &self.options().extra_options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = DumpOptions::default();
        assert_eq!(options.host, "localhost");
        assert_eq!(options.db_name(), None);
        assert!(options.dump_binary_path.is_empty());
        assert!(options.extra_options.is_empty());
        assert!(!options.db_name_from_extra_option());
    }

    #[test]
    fn test_binary_path() {
        let mut options = DumpOptions::default();
        assert_eq!(options.binary("mysqldump"), "mysqldump");

        options.dump_binary_path = "/custom/directory".to_string();
        assert_eq!(options.binary("mysqldump"), "/custom/directory/mysqldump");

        options.dump_binary_path = "/usr/bin/".to_string();
        assert_eq!(options.binary("sqlite3"), "/usr/bin/sqlite3");
    }

    #[test]
    fn test_databases_extra_option_sets_db_name() {
        let mut options = DumpOptions::default();
        options.add_extra_option("--extra-option".to_string());
        assert_eq!(options.db_name(), None);

        options.add_extra_option("--databases testName".to_string());
        assert_eq!(options.db_name(), Some("testName"));
        assert!(options.db_name_from_extra_option());
        assert_eq!(
            options.extra_options,
            ["--extra-option", "--databases testName"]
        );
    }

    #[test]
    fn test_databases_extra_option_with_several_names() {
        let mut options = DumpOptions::default();
        options.add_extra_option("--databases  db1 db2".to_string());
        assert_eq!(options.db_name(), Some("db1"));
        assert_eq!(options.extra_options, ["--databases  db1 db2"]);

        let mut options = DumpOptions::default();
        options.add_extra_option("--databases ".to_string());
        assert_eq!(options.db_name(), None);
        assert!(!options.db_name_from_extra_option());
    }

    #[test]
    fn test_extra_option_overrides_explicit_db_name() {
        let mut options = DumpOptions {
            db_name: Some("testName".to_string()),
            ..Default::default()
        };
        options.add_extra_option("--databases otherName".to_string());
        assert_eq!(options.db_name(), Some("otherName"));
    }

    #[test]
    fn test_serialization_skips_credentials() {
        let mut options = DumpOptions::default();
        options.credentials.set_password("secret".to_string());
        let json = serde_json::to_string(&options).unwrap();
        assert!(!json.contains("secret"));
        assert!(!json.contains("credentials"));
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let options: DumpOptions = serde_json::from_str(r#"{"db_name": "shop"}"#).unwrap();
        assert_eq!(options.db_name(), Some("shop"));
        assert_eq!(options.host, "localhost");
        assert_eq!(options.timeout, None);
    }
}
