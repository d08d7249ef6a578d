//! Credential handling for dump commands.
//!
//! # Security Guarantees
//! - Credentials are zeroed from memory when dropped
//! - MySQL passwords travel through an owner-only temporary file, never argv
//! - Passwords are redacted from logs, debug output and error messages
//!
//! # Module Structure
//! - `credentials`: Credential container with automatic memory zeroing
//! - `credentials_file`: MySQL option file rendering and its temporary file

mod credentials;
mod credentials_file;

pub use credentials::Credentials;
pub use credentials_file::{CredentialsFile, render_credentials_file};
