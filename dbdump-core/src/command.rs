//! Rendered dump commands.
//!
//! A [`DumpCommand`] is an ordered list of shell fragments. The fragment
//! order is part of each dumper's contract. Alongside the real fragments a
//! redacted copy is kept in which secret values are masked, and that copy is
//! the only rendering used for logs and errors.

use std::fmt;

const REDACTED: &str = "****";

/// Quotes `value` as one opaque shell word.
///
/// Embedded single quotes are closed, escaped and reopened.
///
/// # Example
/// ```rust
/// use dbdump_core::command::shell_quote;
///
/// assert_eq!(shell_quote("mysqldump"), "'mysqldump'");
/// assert_eq!(shell_quote("it's"), r"'it'\''s'");
/// ```
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// Ordered command-line fragments for one dump.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DumpCommand {
    tokens: Vec<String>,
    redacted: Vec<String>,
}

impl DumpCommand {
    /// Starts a command with the quoted path of the dump binary.
    pub fn new(binary: &str) -> Self {
        let mut command = Self::default();
        command.push(shell_quote(binary));
        command
    }

    /// Starts a command from a complete shell line.
    pub fn from_line(line: impl Into<String>) -> Self {
        let mut command = Self::default();
        command.push(line);
        command
    }

    /// Appends a fragment that carries no secret.
    pub fn push(&mut self, token: impl Into<String>) {
        let token = token.into();
        self.redacted.push(token.clone());
        self.tokens.push(token);
    }

    /// Appends `flag` followed by a quoted secret value.
    ///
    /// The redacted rendering shows the flag with a masked value.
    pub fn push_secret(&mut self, flag: &str, secret: &str) {
        self.tokens.push(format!("{} {}", flag, shell_quote(secret)));
        self.redacted
            .push(format!("{} {}", flag, shell_quote(REDACTED)));
    }

    /// Fragments in order, secrets included.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Command line handed to the shell, secrets included.
    pub fn command_line(&self) -> String {
        self.tokens.join(" ")
    }

    /// Command line with secret values masked.
    pub fn redacted(&self) -> String {
        self.redacted.join(" ")
    }
}

/// Displays the redacted command line.
impl fmt::Display for DumpCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted())
    }
}
