//! Credential container with automatic memory zeroing.
//!
//! # Security
//! - Username and password are wiped from memory when dropped
//! - The password is never exposed in debug output or logs

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Username and password for a dump, zeroed on drop.
///
/// # Example
///
/// ```rust
/// use dbdump_core::security::Credentials;
///
/// let creds = Credentials::new(Some("admin".to_string()), Some("secret".to_string()));
/// assert_eq!(creds.username(), Some("admin"));
/// assert!(creds.has_password());
/// assert!(!format!("{:?}", creds).contains("secret"));
/// ```
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct Credentials {
    username: Option<String>,
    password: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "****"))
            .finish()
    }
}

impl Credentials {
    /// Creates new credentials.
    pub const fn new(username: Option<String>, password: Option<String>) -> Self {
        Self { username, password }
    }

    /// Gets the username, if one is set and non-empty.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref().filter(|u| !u.is_empty())
    }

    /// Gets the password, if one is set and non-empty.
    ///
    /// Callers must not log the returned value.
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.is_empty())
    }

    /// Checks if a password is present without exposing it.
    pub fn has_password(&self) -> bool {
        self.password().is_some()
    }

    pub(crate) fn set_username(&mut self, username: String) {
        self.username.zeroize();
        self.username = Some(username);
    }

    pub(crate) fn set_password(&mut self, password: String) {
        self.password.zeroize();
        self.password = Some(password);
    }
}
