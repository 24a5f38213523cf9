//! WSL backend: runs the command in a Windows Subsystem for Linux distribution

use async_trait::async_trait;

use super::shell::{self, escape_double_quotes, ShellInvocation};
use super::Executor;
use crate::paths::to_wsl_path;
use crate::types::{ExecError, ExecutionLimits, ExecutionResult};

pub const DEFAULT_WSL_DISTRIBUTION: &str = "Ubuntu";

pub struct WslExecutor {
    distribution: String,
    limits: ExecutionLimits,
}

impl WslExecutor {
    /// `None` selects [`DEFAULT_WSL_DISTRIBUTION`]
    pub fn new(distribution: Option<String>, limits: ExecutionLimits) -> Self {
        Self {
            distribution: distribution.unwrap_or_else(|| DEFAULT_WSL_DISTRIBUTION.to_string()),
            limits,
        }
    }

    pub fn distribution(&self) -> &str {
        &self.distribution
    }

    /// `wsl -d <distribution> --cd "<wsl path>" <command>`
    pub fn compose(&self, command: &str, working_directory: &str) -> ShellInvocation {
        ShellInvocation {
            line: format!(
                "wsl -d {} --cd \"{}\" {}",
                self.distribution,
                to_wsl_path(working_directory),
                escape_double_quotes(command)
            ),
            cwd: None,
        }
    }
}

#[async_trait]
impl Executor for WslExecutor {
    fn name(&self) -> &str {
        "WslExecutor"
    }

    async fn execute(
        &self,
        command: &str,
        working_directory: &str,
    ) -> Result<ExecutionResult, ExecError> {
        let invocation = self.compose(command, working_directory);
        tracing::debug!(line = %invocation.line, "Composed wsl invocation");
        shell::run(&invocation, &self.limits).await
    }
}
