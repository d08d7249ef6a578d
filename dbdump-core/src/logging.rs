//! Logging setup for programs that embed the dumper.
//!
//! The library only emits `tracing` events; callers decide whether and how
//! to subscribe. At INFO a dump reports its start and end, at DEBUG the
//! redacted command line, and failures are logged at ERROR:
//!
//! ```text
//! INFO Starting MySQL dump to shop.sql
//! DEBUG Running dump command: 'mysqldump' --defaults-extra-file="/tmp/dbdump-credentials-x1.cnf" ... shop
//! ERROR Dump command failed with exit code Some(2): 'mongodump' --db events --password '****' ...
//! ```

use crate::{Result, error::DumpError};
use tracing_subscriber::EnvFilter;

/// Maps verbosity flags to a maximum log level.
const fn level_for(verbose: u8, quiet: bool) -> tracing::Level {
    match (quiet, verbose) {
        (true, _) => tracing::Level::ERROR,
        (false, 0) => tracing::Level::INFO,
        (false, 1) => tracing::Level::DEBUG,
        (false, _) => tracing::Level::TRACE,
    }
}

/// Filter directive scoping the verbosity to this crate's events.
fn default_directive(verbose: u8, quiet: bool) -> String {
    format!(
        "{}={}",
        env!("CARGO_CRATE_NAME"),
        level_for(verbose, quiet).as_str().to_ascii_lowercase()
    )
}

/// Initializes structured logging for dump events.
///
/// `RUST_LOG` takes precedence when set; otherwise the verbosity flags
/// select the level for `dbdump_core` events (0=INFO, 1=DEBUG, 2+=TRACE,
/// `quiet` shows only errors).
///
/// # Errors
/// Returns a configuration error if the filter is invalid or a global
/// subscriber is already set.
///
/// # Example
/// ```rust,no_run
/// use dbdump_core::logging::init_logging;
/// use dbdump_core::{CommonOptions, Dumper, MySql};
///
/// # async fn run() -> dbdump_core::Result<()> {
/// // DEBUG shows the redacted dump command lines
/// init_logging(1, false)?;
/// MySql::new()
///     .with_db_name("shop")
///     .with_user_name("backup")
///     .dump()
///     .await?;
/// # Ok(())
/// # }
/// ```
pub fn init_logging(verbose: u8, quiet: bool) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_directive(verbose, quiet)).map_err(|e| {
            DumpError::configuration(format!("Invalid log filter: {}", e))
        })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .try_init()
        .map_err(|e| DumpError::configuration(format!("Failed to initialize logging: {}", e)))
}
