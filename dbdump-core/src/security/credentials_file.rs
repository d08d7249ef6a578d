//! MySQL option file holding the connection credentials.
//!
//! `mysqldump` reads it through `--defaults-extra-file`, which keeps the
//! password off the process argument list.

use super::credentials::Credentials;
use crate::{Result, error::DumpError};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, warn};
use zeroize::Zeroizing;

#[cfg(windows)]
const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
const LINE_ENDING: &str = "\n";

/// Renders the `[client]` section of a MySQL option file.
///
/// Lines appear in the order `user`, `password`, `host`, `port` and only
/// for values that are set and non-empty.
///
/// # Example
/// ```rust
/// use dbdump_core::security::{Credentials, render_credentials_file};
///
/// let creds = Credentials::new(Some("u".to_string()), None);
/// let contents = render_credentials_file(&creds, "h", Some(3306));
/// assert_eq!(contents.lines().collect::<Vec<_>>(), ["[client]", "user = 'u'", "host = 'h'", "port = '3306'"]);
/// ```
pub fn render_credentials_file(
    credentials: &Credentials,
    host: &str,
    port: Option<u16>,
) -> Zeroizing<String> {
    let port = port.map(|p| p.to_string());
    let entries = [
        ("user", credentials.username()),
        ("password", credentials.password()),
        ("host", Some(host).filter(|h| !h.is_empty())),
        ("port", port.as_deref()),
    ];

    let mut lines = vec!["[client]".to_string()];
    lines.extend(
        entries
            .iter()
            .filter_map(|(key, value)| value.map(|v| format!("{} = '{}'", key, v))),
    );

    let contents = Zeroizing::new(lines.join(LINE_ENDING));
    for mut line in lines {
        zeroize::Zeroize::zeroize(&mut line);
    }
    contents
}

/// Temporary credentials file that is removed when the dump finishes.
///
/// The file gets a random name and owner-only permissions. Call
/// [`CredentialsFile::close`] to remove it and log a failed removal;
/// dropping it removes the file silently.
#[derive(Debug)]
pub struct CredentialsFile {
    file: NamedTempFile,
}

impl CredentialsFile {
    /// Creates a fresh temporary file holding `contents`.
    ///
    /// # Errors
    /// Returns an I/O error if the file cannot be created or written.
    pub fn create(contents: &str) -> Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("dbdump-credentials-")
            .suffix(".cnf")
            .tempfile()
            .map_err(|e| DumpError::io("Failed to create credentials file", e))?;

        file.write_all(contents.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|e| DumpError::io("Failed to write credentials file", e))?;

        debug!("Wrote credentials file {}", file.path().display());
        Ok(Self { file })
    }

    /// Location of the file on disk.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Removes the file. Failures are logged and otherwise ignored.
    pub fn close(self) {
        let path = self.file.path().to_path_buf();
        match self.file.close() {
            Ok(()) => debug!("Removed credentials file {}", path.display()),
            Err(e) => warn!(
                "Failed to remove credentials file {}: {}",
                path.display(),
                e
            ),
        }
    }
}
