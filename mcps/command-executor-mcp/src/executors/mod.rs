//! Execution backends
//!
//! Every backend turns `(command, working directory)` into a single host
//! process launch. They differ only in how the command line is wrapped:
//!
//! | Backend | Host shell line | Directory |
//! |---|---|---|
//! | [`LocalExecutor`] | the command itself | native cwd |
//! | [`DockerExecutor`] | `docker exec -w "<dir>" <id> /bin/sh -c "<cmd>"` | `-w` |
//! | [`WslExecutor`] | `wsl -d <distro> --cd "<wsl dir>" <cmd>` | `--cd`, after [`to_wsl_path`](crate::paths::to_wsl_path) |
//!
//! [`create_executor`] is the only place a backend is chosen.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::ExecutorConfig;
use crate::types::{ConfigError, ExecError, ExecutionLimits, ExecutionResult};

pub mod docker;
pub mod local;
pub mod shell;
pub mod wsl;

pub use docker::DockerExecutor;
pub use local::LocalExecutor;
pub use wsl::{WslExecutor, DEFAULT_WSL_DISTRIBUTION};

/// Trait for execution backends
///
/// `execute` returns `Ok` for any process that ran to completion, whatever
/// its exit code. `Err` means the process could not be launched or was
/// killed on timeout.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Backend name for logs
    fn name(&self) -> &str;

    async fn execute(
        &self,
        command: &str,
        working_directory: &str,
    ) -> Result<ExecutionResult, ExecError>;
}

/// Build the backend selected by `config`
pub fn create_executor(
    config: &ExecutorConfig,
    limits: ExecutionLimits,
) -> Result<Arc<dyn Executor>, ConfigError> {
    let executor: Arc<dyn Executor> = match config {
        ExecutorConfig::Local => Arc::new(LocalExecutor::new(limits)),
        ExecutorConfig::Docker { container_id } => {
            Arc::new(DockerExecutor::new(container_id.clone(), limits)?)
        }
        ExecutorConfig::Wsl { distribution } => {
            Arc::new(WslExecutor::new(Some(distribution.clone()), limits))
        }
    };
    Ok(executor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_selects_backend() {
        let limits = ExecutionLimits::default();

        let local = create_executor(&ExecutorConfig::Local, limits).unwrap();
        assert_eq!(local.name(), "LocalExecutor");

        let docker = create_executor(
            &ExecutorConfig::Docker {
                container_id: "abc123".to_string(),
            },
            limits,
        )
        .unwrap();
        assert_eq!(docker.name(), "DockerExecutor");

        let wsl = create_executor(
            &ExecutorConfig::Wsl {
                distribution: "Debian".to_string(),
            },
            limits,
        )
        .unwrap();
        assert_eq!(wsl.name(), "WslExecutor");
    }

    #[test]
    fn test_factory_rejects_empty_container() {
        let result = create_executor(
            &ExecutorConfig::Docker {
                container_id: String::new(),
            },
            ExecutionLimits::default(),
        );
        assert!(matches!(result, Err(ConfigError::MissingContainerId)));
    }
}
