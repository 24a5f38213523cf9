//! Local backend: runs the command on the host

use std::path::PathBuf;

use async_trait::async_trait;

use super::shell::{self, ShellInvocation};
use super::Executor;
use crate::types::{ExecError, ExecutionLimits, ExecutionResult};

/// Runs commands verbatim in the host shell
pub struct LocalExecutor {
    limits: ExecutionLimits,
}

impl LocalExecutor {
    pub fn new(limits: ExecutionLimits) -> Self {
        Self { limits }
    }

    /// The command is passed through untouched; the directory becomes the
    /// process cwd
    pub fn compose(&self, command: &str, working_directory: &str) -> ShellInvocation {
        ShellInvocation {
            line: command.to_string(),
            cwd: Some(PathBuf::from(working_directory)),
        }
    }
}

#[async_trait]
impl Executor for LocalExecutor {
    fn name(&self) -> &str {
        "LocalExecutor"
    }

    async fn execute(
        &self,
        command: &str,
        working_directory: &str,
    ) -> Result<ExecutionResult, ExecError> {
        let invocation = self.compose(command, working_directory);
        shell::run(&invocation, &self.limits).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_uses_native_cwd() {
        let executor = LocalExecutor::new(ExecutionLimits::default());
        let invocation = executor.compose(r#"git commit -m "x""#, "/work");

        assert_eq!(invocation.line, r#"git commit -m "x""#);
        assert_eq!(invocation.cwd, Some(PathBuf::from("/work")));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_execute_in_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("marker.txt"), "x").unwrap();

        let executor = LocalExecutor::new(ExecutionLimits::default());
        let result = executor
            .execute("ls", &dir.path().to_string_lossy())
            .await
            .unwrap();

        assert!(result.success());
        assert!(result.stdout.contains("marker.txt"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_is_still_a_result() {
        let dir = tempfile::tempdir().unwrap();
        let executor = LocalExecutor::new(ExecutionLimits::default());
        let result = executor
            .execute("ls does-not-exist", &dir.path().to_string_lossy())
            .await
            .unwrap();

        assert!(!result.success());
        assert!(!result.stderr.is_empty());
    }
}
