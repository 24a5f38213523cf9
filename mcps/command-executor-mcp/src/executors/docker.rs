//! Docker backend: runs the command inside a running container via `docker exec`

use async_trait::async_trait;

use super::shell::{self, escape_double_quotes, ShellInvocation};
use super::Executor;
use crate::types::{ConfigError, ExecError, ExecutionLimits, ExecutionResult};

pub struct DockerExecutor {
    container_id: String,
    limits: ExecutionLimits,
}

impl DockerExecutor {
    /// Fails when `container_id` is empty
    pub fn new(container_id: impl Into<String>, limits: ExecutionLimits) -> Result<Self, ConfigError> {
        let container_id = container_id.into();
        if container_id.trim().is_empty() {
            return Err(ConfigError::MissingContainerId);
        }
        Ok(Self {
            container_id,
            limits,
        })
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    /// `docker exec -w "<dir>" <container> /bin/sh -c "<command>"`
    ///
    /// The directory is passed to docker, not used as the host cwd.
    pub fn compose(&self, command: &str, working_directory: &str) -> ShellInvocation {
        ShellInvocation {
            line: format!(
                "docker exec -w \"{}\" {} /bin/sh -c \"{}\"",
                working_directory,
                self.container_id,
                escape_double_quotes(command)
            ),
            cwd: None,
        }
    }
}

#[async_trait]
impl Executor for DockerExecutor {
    fn name(&self) -> &str {
        "DockerExecutor"
    }

    async fn execute(
        &self,
        command: &str,
        working_directory: &str,
    ) -> Result<ExecutionResult, ExecError> {
        let invocation = self.compose(command, working_directory);
        tracing::debug!(line = %invocation.line, "Composed docker invocation");
        shell::run(&invocation, &self.limits).await
    }
}
