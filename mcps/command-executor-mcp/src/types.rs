//! Type definitions for the command executor

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Execution Types
// ============================================================================

/// Captured output of a process that ran to completion
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    /// Either stream was cut at `max_output_bytes`
    pub truncated: bool,
}

impl ExecutionResult {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// stdout, or stderr when stdout is empty
    pub fn output_text(&self) -> &str {
        if self.stdout.is_empty() {
            &self.stderr
        } else {
            &self.stdout
        }
    }

    /// Exit status, followed by the output when there is any
    fn failure_message(&self) -> String {
        let status = match self.exit_code {
            Some(code) => format!("exited with status {}", code),
            None => "terminated by signal".to_string(),
        };

        match self.output_text().trim_end() {
            "" => status,
            output => format!("{}: {}", status, output),
        }
    }
}

/// Limits applied to every process launch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionLimits {
    /// Maximum bytes kept per stream (stdout/stderr)
    pub max_output_bytes: usize,
    /// Kill the process after this many seconds; `None` waits forever
    pub timeout_secs: Option<u64>,
}

pub const DEFAULT_MAX_OUTPUT_BYTES: usize = 1024 * 1024; // 1MB

impl Default for ExecutionLimits {
    fn default() -> Self {
        Self {
            max_output_bytes: DEFAULT_MAX_OUTPUT_BYTES,
            timeout_secs: None,
        }
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Failures raised by an execution backend
#[derive(Error, Debug)]
pub enum ExecError {
    #[error("failed to launch `{program}`: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to collect command output: {0}")]
    Output(#[source] std::io::Error),

    #[error("Command timed out after {0}s")]
    Timeout(u64),
}

/// Faults detected while building the gateway; these stop startup
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Container ID is required for Docker executor")]
    MissingContainerId,

    #[error("Unknown execution environment '{0}' (expected local, docker or wsl)")]
    UnknownEnvironment(String),

    #[error("Invalid working directory: {0}")]
    WorkingDirectory(#[from] ResolveError),
}

/// Working-directory resolution failures
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("path contains a NUL byte: {0:?}")]
    InvalidCharacters(String),

    #[error("cannot read current directory: {0}")]
    CurrentDir(#[source] std::io::Error),
}

/// Request-time failures; the server reports all of these as soft errors
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Command not allowed: {command}. Allowed commands: {}", .allowed.join(", "))]
    NotAllowed {
        command: String,
        allowed: Vec<String>,
    },

    #[error(transparent)]
    Execution(#[from] ExecError),

    #[error("{}", .0.failure_message())]
    Failed(ExecutionResult),

    #[error(transparent)]
    WorkingDirectory(#[from] ResolveError),
}
