//! Command Executor MCP Library
//!
//! Runs allow-listed shell commands on behalf of an MCP client, either on
//! the host, inside a running Docker container, or in a WSL distribution.
//!
//! The allow-list checks only the first word of a command. Anything the
//! shell does with the rest of the line (`;`, `&&`, `|`, `$(...)`) runs with
//! the full privileges of the target environment.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use command_executor_mcp::{CommandExecutorServer, ServerOptions};
//!
//! let server = CommandExecutorServer::from_options(&ServerOptions::default())?;
//! let result = server.gateway().execute_command("git status", None).await?;
//! ```

pub mod authorizer;
pub mod cli;
pub mod config;
pub mod executors;
pub mod gateway;
pub mod handlers;
pub mod params;
pub mod paths;
pub mod server;
pub mod types;

pub use authorizer::{AllowList, DEFAULT_ALLOWED_COMMANDS};
pub use cli::Cli;
pub use config::{ExecutionEnvironment, ExecutorConfig, ServerOptions};
pub use executors::{create_executor, Executor};
pub use gateway::{AllowOutcome, CommandGateway};
pub use server::CommandExecutorServer;
pub use types::{ConfigError, ExecError, ExecutionLimits, ExecutionResult, GatewayError};

// Re-export parameter types for direct API usage
pub use params::*;
