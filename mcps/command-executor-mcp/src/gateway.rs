//! Command gateway - authorization, directory state and dispatch
//!
//! The allow-list and the default working directory sit behind a single
//! lock so a reader never sees one updated without the other. The lock is
//! released before a command runs; executions do not block each other or
//! the admin operations.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::authorizer::AllowList;
use crate::config::ServerOptions;
use crate::executors::{create_executor, Executor};
use crate::paths::resolve_path;
use crate::types::{ConfigError, ExecutionResult, GatewayError, ResolveError};

/// Result of [`CommandGateway::add_allowed_command`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowOutcome {
    /// Newly added; carries the updated allow-list
    Added(Vec<String>),
    AlreadyPresent,
}

struct GatewayState {
    allow_list: AllowList,
    working_directory: PathBuf,
}

pub struct CommandGateway {
    state: RwLock<GatewayState>,
    executor: Arc<dyn Executor>,
}

impl CommandGateway {
    pub fn new(
        allow_list: AllowList,
        working_directory: PathBuf,
        executor: Arc<dyn Executor>,
    ) -> Self {
        tracing::info!("Allowed commands: {}", allow_list);
        tracing::info!("Default working directory: {}", working_directory.display());
        tracing::info!("Using executor: {}", executor.name());

        Self {
            state: RwLock::new(GatewayState {
                allow_list,
                working_directory,
            }),
            executor,
        }
    }

    /// Build the allow-list, initial directory and backend from startup options
    pub fn from_options(options: &ServerOptions) -> Result<Self, ConfigError> {
        let allow_list = AllowList::with_defaults(options.allow_commands.iter().cloned());

        let working_directory = match options.working_directory.as_deref() {
            Some(dir) => resolve_path(dir)?,
            None => std::env::current_dir().map_err(ResolveError::CurrentDir)?,
        };

        let executor = create_executor(&options.executor, options.limits)?;

        Ok(Self::new(allow_list, working_directory, executor))
    }

    pub fn executor_name(&self) -> &str {
        self.executor.name()
    }

    pub async fn allowed_commands(&self) -> Vec<String> {
        self.state.read().await.allow_list.to_vec()
    }

    pub async fn working_directory(&self) -> PathBuf {
        self.state.read().await.working_directory.clone()
    }

    pub async fn is_allowed(&self, command: &str) -> bool {
        self.state.read().await.allow_list.is_allowed(command)
    }

    /// Authorize and run a command
    ///
    /// An empty or missing `working_directory` means the gateway default.
    /// A process that exits non-zero is reported as [`GatewayError::Failed`]
    /// carrying its full result.
    pub async fn execute_command(
        &self,
        command: &str,
        working_directory: Option<&str>,
    ) -> Result<ExecutionResult, GatewayError> {
        let directory = {
            let state = self.state.read().await;

            if !state.allow_list.is_allowed(command) {
                tracing::warn!(command, "Rejected command not on allow list");
                return Err(GatewayError::NotAllowed {
                    command: command.to_string(),
                    allowed: state.allow_list.to_vec(),
                });
            }

            match working_directory.filter(|d| !d.is_empty()) {
                Some(dir) => resolve_path(dir)?,
                None => state.working_directory.clone(),
            }
        };

        tracing::info!(command, directory = %directory.display(), "Executing command");

        let result = self
            .executor
            .execute(command, &directory.to_string_lossy())
            .await
            .map_err(|e| {
                tracing::warn!(command, error = %e, "Command could not run");
                e
            })?;

        if !result.success() {
            tracing::warn!(command, exit_code = ?result.exit_code, "Command failed");
            return Err(GatewayError::Failed(result));
        }

        Ok(result)
    }

    /// Add a command to the allow-list; adding an existing entry is a no-op
    pub async fn add_allowed_command(&self, command: &str) -> AllowOutcome {
        let mut state = self.state.write().await;

        if state.allow_list.insert(command) {
            tracing::info!(command, "Added command to allow list");
            AllowOutcome::Added(state.allow_list.to_vec())
        } else {
            AllowOutcome::AlreadyPresent
        }
    }

    /// Replace the default working directory; returns the resolved path
    pub async fn change_working_directory(&self, path: &str) -> Result<PathBuf, GatewayError> {
        let resolved = resolve_path(path)?;

        self.state.write().await.working_directory = resolved.clone();
        tracing::info!(directory = %resolved.display(), "Working directory changed");

        Ok(resolved)
    }
}
