//! Native database dumps for MySQL, MongoDB and SQLite.
//!
//! This crate builds the exact command line for a database's own dump
//! utility (`mysqldump`, `mongodump`, `sqlite3`), runs it as a subprocess
//! and reports failures with bounded diagnostic output.
//!
//! # Security Guarantees
//! - MySQL passwords are passed through an owner-only temporary option
//!   file that is removed on every exit path, never through argv
//! - Credentials are zeroed from memory on drop and never serialized
//! - Command lines in logs and errors are redacted
//!
//! # Architecture
//! - One Option Set and command builder per database kind
//! - A [`Dumper`] trait and [`create_dumper`] factory for dynamic dispatch
//! - A [`ProcessRunner`] seam between command rendering and execution
//!
//! # Example
//! ```rust,no_run
//! use dbdump_core::{CommonOptions, Dumper, MySql};
//!
//! # async fn example() -> dbdump_core::Result<()> {
//! let path = MySql::new()
//!     .with_db_name("shop")
//!     .with_user_name("backup")
//!     .with_password("secret")
//!     .exclude_tables("sessions, cache")?
//!     .use_single_transaction()
//!     .dump()
//!     .await?;
//! println!("dump written to {}", path.display());
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod config;
pub mod dumpers;
pub mod error;
pub mod execution;
pub mod logging;
pub mod options;
pub mod runner;
pub mod security;
pub mod tables;

// Re-export commonly used types
pub use command::DumpCommand;
pub use config::DumpConfig;
pub use dumpers::{DatabaseType, Dumper, MongoDb, MySql, Sqlite, create_dumper};
pub use error::{DumpError, Result};
pub use execution::verify_dump_file;
pub use logging::init_logging;
pub use options::{CommonOptions, DumpOptions};
pub use runner::{ProcessOutput, ProcessRunner, RunnerError, ShellRunner};
pub use tables::{TableFilter, TableList};
