//! Error types for dump configuration and execution.
//!
//! Errors fall into two families: configuration errors, raised before any
//! process is spawned, and execution failures, raised after the dump command
//! was handed to the process runner. Command lines carried by execution
//! failures are always the redacted rendering, so passwords never reach
//! error messages or logs.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Main error type for dump operations.
#[derive(Debug, Error)]
pub enum DumpError {
    /// A required option was not set before dumping
    #[error("Cannot start dump: parameter `{parameter}` is empty")]
    EmptyParameter { parameter: &'static str },

    /// An option conflicts with one that was set earlier
    #[error("Cannot set parameter `{parameter}` because `{conflicting}` is already set")]
    ConflictingParameter {
        parameter: &'static str,
        conflicting: &'static str,
    },

    /// Configuration or validation error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// The dump process exited unsuccessfully
    #[error("Dump failed with exit code {}: {output}", .exit_code.map_or_else(|| "unknown".to_string(), |c| c.to_string()))]
    ProcessFailed {
        command: String,
        exit_code: Option<i32>,
        output: String,
    },

    /// The dump process could not be started
    #[error("Dump process could not be started: {command}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The dump process exceeded its wall-clock limit and was killed
    #[error("Dump process timed out after {timeout:?}")]
    Timeout { command: String, timeout: Duration },

    /// The dump completed but produced no file
    #[error("Dump file was not created: {}", .path.display())]
    DumpFileMissing { path: PathBuf },

    /// The dump completed but the file is empty
    #[error("Dump file is empty: {}", .path.display())]
    DumpFileEmpty { path: PathBuf },

    /// I/O operation failed
    #[error("I/O operation failed: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Serialization or deserialization failed
    #[error("Serialization failed: {context}")]
    Serialization {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results with DumpError
pub type Result<T> = std::result::Result<T, DumpError>;

impl DumpError {
    /// Creates an empty parameter error
    pub const fn empty_parameter(parameter: &'static str) -> Self {
        Self::EmptyParameter { parameter }
    }

    /// Creates a conflicting parameter error
    pub const fn conflicting_parameter(
        parameter: &'static str,
        conflicting: &'static str,
    ) -> Self {
        Self::ConflictingParameter {
            parameter,
            conflicting,
        }
    }

    /// Creates a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates an I/O error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Returns true for errors raised before any process was spawned.
    pub const fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyParameter { .. }
                | Self::ConflictingParameter { .. }
                | Self::Configuration { .. }
        )
    }

    /// Returns true for errors raised by running the dump command.
    pub const fn is_execution_failure(&self) -> bool {
        matches!(
            self,
            Self::ProcessFailed { .. } | Self::Launch { .. } | Self::Timeout { .. }
        )
    }

    /// Redacted command line associated with an execution failure.
    pub fn command(&self) -> Option<&str> {
        match self {
            Self::ProcessFailed { command, .. }
            | Self::Launch { command, .. }
            | Self::Timeout { command, .. } => Some(command),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = DumpError::empty_parameter("db_name");
        assert!(error.to_string().contains("db_name"));
        assert!(error.is_configuration_error());
        assert!(!error.is_execution_failure());

        let error = DumpError::conflicting_parameter("include_tables", "exclude_tables");
        assert!(error.to_string().contains("include_tables"));
        assert!(error.to_string().contains("exclude_tables"));
        assert!(error.is_configuration_error());
    }

    #[test]
    fn test_process_failed_message() {
        let error = DumpError::ProcessFailed {
            command: "'mysqldump' dbname".to_string(),
            exit_code: Some(2),
            output: "access denied".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Dump failed with exit code 2: access denied"
        );
        assert!(error.is_execution_failure());
        assert_eq!(error.command(), Some("'mysqldump' dbname"));

        let error = DumpError::ProcessFailed {
            command: String::new(),
            exit_code: None,
            output: "killed".to_string(),
        };
        assert!(error.to_string().contains("unknown"));
    }

    #[test]
    fn test_timeout_is_execution_failure() {
        let error = DumpError::Timeout {
            command: "'mongodump'".to_string(),
            timeout: Duration::from_secs(5),
        };
        assert!(error.is_execution_failure());
        assert!(!error.is_configuration_error());
        assert!(error.to_string().contains("5s"));
    }

    #[test]
    fn test_verification_errors_are_neither_family() {
        let error = DumpError::DumpFileEmpty {
            path: PathBuf::from("dump.sql"),
        };
        assert!(!error.is_configuration_error());
        assert!(!error.is_execution_failure());
        assert_eq!(error.command(), None);
    }
}
