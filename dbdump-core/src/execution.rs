//! Running a rendered dump command and classifying the outcome.

use crate::command::DumpCommand;
use crate::runner::{ProcessOutput, ProcessRunner, RunnerError};
use crate::{Result, error::DumpError};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error};

/// Upper bound, in bytes, of diagnostic output kept in errors.
pub const MAX_DIAGNOSTIC_BYTES: usize = 4096;

/// Keeps at most the last `max_bytes` bytes of `text`, cut on a char boundary.
pub(crate) fn tail(text: &str, max_bytes: usize) -> &str {
    let mut start = text.len().saturating_sub(max_bytes);
    while !text.is_char_boundary(start) {
        start = start.saturating_add(1);
    }
    text.get(start..).unwrap_or_default()
}

/// Combined stderr and stdout of a failed process, bounded in size.
fn diagnostic_output(output: &ProcessOutput) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let combined = [stderr.trim(), stdout.trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    tail(&combined, MAX_DIAGNOSTIC_BYTES).to_string()
}

/// Runs `command` through `runner` and maps failures to [`DumpError`].
///
/// # Errors
/// Returns [`DumpError::Launch`], [`DumpError::Timeout`] or
/// [`DumpError::ProcessFailed`] carrying the redacted command line.
pub async fn execute(
    command: &DumpCommand,
    timeout: Option<Duration>,
    runner: &dyn ProcessRunner,
) -> Result<()> {
    let redacted = command.redacted();
    debug!("Running dump command: {}", redacted);

    let output = match runner.run(&command.command_line(), timeout).await {
        Ok(output) => output,
        Err(RunnerError::Launch(source)) => {
            error!("Dump command could not be started: {}", redacted);
            return Err(DumpError::Launch {
                command: redacted,
                source,
            });
        }
        Err(RunnerError::TimedOut(limit)) => {
            error!("Dump command timed out after {:?}: {}", limit, redacted);
            return Err(DumpError::Timeout {
                command: redacted,
                timeout: limit,
            });
        }
    };

    if output.success() {
        return Ok(());
    }

    let diagnostics = diagnostic_output(&output);
    error!(
        "Dump command failed with exit code {:?}: {}",
        output.exit_code, redacted
    );
    Err(DumpError::ProcessFailed {
        command: redacted,
        exit_code: output.exit_code,
        output: diagnostics,
    })
}

/// Checks that a dump file exists and is not empty.
///
/// Dumping never does this implicitly; call it when the caller wants the
/// guarantee.
///
/// # Errors
/// Returns [`DumpError::DumpFileMissing`] or [`DumpError::DumpFileEmpty`].
///
/// # Returns
/// The size of the file in bytes.
pub fn verify_dump_file(path: &Path) -> Result<u64> {
    let metadata = match std::fs::metadata(path) {
        Ok(metadata) if metadata.is_file() => metadata,
        Ok(_) => {
            return Err(DumpError::DumpFileMissing {
                path: path.to_path_buf(),
            });
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(DumpError::DumpFileMissing {
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(DumpError::io("Failed to inspect dump file", e)),
    };

    match metadata.len() {
        0 => Err(DumpError::DumpFileEmpty {
            path: path.to_path_buf(),
        }),
        size => Ok(size),
    }
}
