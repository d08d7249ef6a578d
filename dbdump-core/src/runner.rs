//! Process execution seam.
//!
//! Dumpers never spawn processes themselves; they hand a command line to a
//! [`ProcessRunner`]. [`ShellRunner`] is the production implementation, and
//! tests substitute their own.

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, trace};

/// Captured result of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, `None` if the process was terminated by a signal
    pub exit_code: Option<i32>,
    /// Captured standard output
    pub stdout: Vec<u8>,
    /// Captured standard error
    pub stderr: Vec<u8>,
}

impl ProcessOutput {
    /// Returns true if the process exited with code 0.
    pub const fn success(&self) -> bool {
        matches!(self.exit_code, Some(0))
    }
}

/// Reasons a runner could not produce a [`ProcessOutput`].
#[derive(Debug, Error)]
pub enum RunnerError {
    /// The process could not be started
    #[error("failed to start process: {0}")]
    Launch(#[source] std::io::Error),

    /// The process exceeded its wall-clock limit and was killed
    #[error("process timed out after {0:?}")]
    TimedOut(Duration),
}

/// Runs a shell command line and captures its outcome.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Runs `command_line` to completion or until `timeout` elapses.
    ///
    /// # Errors
    /// Returns [`RunnerError::Launch`] if the process cannot be started and
    /// [`RunnerError::TimedOut`] if the limit is exceeded.
    async fn run(
        &self,
        command_line: &str,
        timeout: Option<Duration>,
    ) -> Result<ProcessOutput, RunnerError>;
}

/// Runs command lines through `sh -c` on the tokio runtime.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    shell: String,
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self {
            shell: "sh".to_string(),
        }
    }
}

impl ShellRunner {
    /// Creates a runner using a specific POSIX shell.
    pub fn with_shell(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }
}

#[async_trait]
impl ProcessRunner for ShellRunner {
    async fn run(
        &self,
        command_line: &str,
        timeout: Option<Duration>,
    ) -> Result<ProcessOutput, RunnerError> {
        let mut command = tokio::process::Command::new(&self.shell);
        command
            .arg("-c")
            .arg(command_line)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        // Pipeline stages share the shell's group so a timeout can stop all of them.
        #[cfg(unix)]
        command.process_group(0);

        let child = command.spawn().map_err(RunnerError::Launch)?;
        let pid = child.id();
        trace!("Spawned {} (pid {:?})", self.shell, pid);

        // Dropping the pending future on timeout kills the shell itself.
        let output = match timeout {
            Some(limit) => {
                match tokio::time::timeout(limit, child.wait_with_output()).await {
                    Ok(output) => output,
                    Err(_) => {
                        if let Some(pid) = pid {
                            kill_process_group(pid);
                        }
                        return Err(RunnerError::TimedOut(limit));
                    }
                }
            }
            None => child.wait_with_output().await,
        }
        .map_err(RunnerError::Launch)?;

        debug!("Process exited with {:?}", output.status.code());
        Ok(ProcessOutput {
            exit_code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

/// Sends `SIGKILL` to every process in the group led by `pid`.
#[cfg(unix)]
#[allow(unsafe_code)]
fn kill_process_group(pid: u32) {
    let Ok(pgid) = libc::pid_t::try_from(pid) else {
        return;
    };
    // SAFETY: kill(2) takes plain integers and touches no memory of ours.
    let ret = unsafe { libc::kill(-pgid, libc::SIGKILL) };
    if ret != 0 {
        debug!(
            "Failed to kill process group {}: {}",
            pgid,
            std::io::Error::last_os_error()
        );
    } else {
        debug!("Killed process group {} after timeout", pgid);
    }
}

#[cfg(not(unix))]
fn kill_process_group(_pid: u32) {}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_shell_runner_captures_output() {
        let output = ShellRunner::default()
            .run("echo out; echo err >&2; exit 3", None)
            .await
            .unwrap();
        assert_eq!(output.exit_code, Some(3));
        assert!(!output.success());
        assert_eq!(output.stdout, b"out\n");
        assert_eq!(output.stderr, b"err\n");
    }

    #[tokio::test]
    async fn test_shell_runner_times_out() {
        let err = ShellRunner::default()
            .run("sleep 5", Some(Duration::from_millis(100)))
            .await
            .unwrap_err();
        assert!(matches!(err, RunnerError::TimedOut(d) if d == Duration::from_millis(100)));
    }

    #[tokio::test]
    async fn test_shell_runner_timeout_stops_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("late-write");
        let command_line = format!(
            "echo x | (sleep 1; touch '{}')",
            marker.display()
        );

        let err = ShellRunner::default()
            .run(&command_line, Some(Duration::from_millis(200)))
            .await
            .unwrap_err();
        assert!(matches!(err, RunnerError::TimedOut(_)));

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(!marker.exists(), "pipeline stage outlived the timeout");
    }

    #[tokio::test]
    async fn test_shell_runner_missing_shell() {
        let err = ShellRunner::with_shell("/nonexistent/shell")
            .run("true", None)
            .await
            .unwrap_err();
        assert!(matches!(err, RunnerError::Launch(_)));
    }
}
