//! In-process tool dispatch
//!
//! [`EmbeddableMcp`] lets a host (or a test) call a server's tools by name
//! with a JSON argument object, without a transport in between.

use async_trait::async_trait;
use rmcp::model::{CallToolResult, Tool};
use serde_json::Value;

/// Error type for embeddable MCP operations
#[derive(Debug, thiserror::Error)]
pub enum EmbeddableError {
    #[error("tool not found: {0}")]
    ToolNotFound(String),

    #[error("invalid parameters: {0}")]
    InvalidParams(#[from] serde_json::Error),

    #[error("mcp error: {0}")]
    McpError(String),
}

impl From<rmcp::ErrorData> for EmbeddableError {
    fn from(err: rmcp::ErrorData) -> Self {
        EmbeddableError::McpError(err.message.to_string())
    }
}

pub type EmbeddableResult<T> = Result<T, EmbeddableError>;

/// Trait for MCP servers that can be executed in-process
///
/// Servers built on `#[tool_router]` implement this by listing their router
/// and matching tool names to the same methods the router calls.
#[async_trait]
pub trait EmbeddableMcp: Send + Sync {
    /// Server name as used in MCP configuration files
    fn server_name(&self) -> &str;

    /// Tools as a client would see them right now
    ///
    /// Async so servers can fold live state into tool descriptions.
    async fn list_tools(&self) -> Vec<Tool>;

    /// Executes a tool by name
    ///
    /// Fails with [`EmbeddableError::ToolNotFound`] for unknown names and
    /// [`EmbeddableError::InvalidParams`] when `params` does not deserialize.
    /// Tool-level failures reported as data come back as `Ok` with
    /// `is_error` set.
    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult>;

    fn server_description(&self) -> Option<&str> {
        None
    }
}
