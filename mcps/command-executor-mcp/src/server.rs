//! MCP Server implementation for allow-listed command execution
//!
//! Tools delegate to the handlers module; all state lives in the
//! [`CommandGateway`] shared between clones of the server.

use std::sync::Arc;

use mcp_common::{
    async_trait, CallToolResult, EmbeddableError, EmbeddableMcp, EmbeddableResult, McpError,
};
use rmcp::{
    handler::server::{router::tool::ToolRouter, tool::ToolCallContext, wrapper::Parameters},
    model::{
        CallToolRequestParam, ListToolsResult, PaginatedRequestParam, ServerCapabilities,
        ServerInfo, Tool,
    },
    service::RequestContext,
    tool, tool_router, RoleServer,
};
use serde_json::Value;

use crate::config::ServerOptions;
use crate::gateway::CommandGateway;
use crate::handlers;
use crate::params::*;
use crate::types::ConfigError;

/// The Command Executor MCP Server
#[derive(Clone)]
pub struct CommandExecutorServer {
    gateway: Arc<CommandGateway>,
    tool_router: ToolRouter<Self>,
}

// ============================================================================
// Tool Router - Each tool delegates to its handler
// ============================================================================

#[tool_router]
impl CommandExecutorServer {
    pub fn new(gateway: CommandGateway) -> Self {
        Self {
            gateway: Arc::new(gateway),
            tool_router: Self::tool_router(),
        }
    }

    /// Build the gateway from startup options; fails if no backend can be formed
    pub fn from_options(options: &ServerOptions) -> Result<Self, ConfigError> {
        Ok(Self::new(CommandGateway::from_options(options)?))
    }

    pub fn gateway(&self) -> &CommandGateway {
        &self.gateway
    }

    /// Router tools, with the live allow-list appended to `execute_command`
    pub async fn tools(&self) -> Vec<Tool> {
        let allowed = self.gateway.allowed_commands().await.join(", ");

        let mut tools = self.tool_router.list_all();
        for tool in tools.iter_mut().filter(|t| t.name == "execute_command") {
            let base = tool.description.as_deref().unwrap_or_default();
            tool.description = Some(format!("{} Valid commands include: {}", base, allowed).into());
        }
        tools
    }

    #[tool(
        description = "Execute a pre-approved command. Only commands whose first word is on the allow list may run; everything after it is passed to the shell unchecked. Use with caution and only execute trusted commands."
    )]
    async fn execute_command(
        &self,
        Parameters(params): Parameters<ExecuteCommandParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(handlers::execute_command(&self.gateway, params).await)
    }

    #[tool(
        description = "Adds a command to the allowed command list. After adding, the command becomes available for the execute_command tool."
    )]
    async fn add_allow_command(
        &self,
        Parameters(params): Parameters<AddAllowCommandParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(handlers::add_allow_command(&self.gateway, params).await)
    }

    #[tool(
        description = "Changes the default working directory of the server. If no working directory is specified in the execute_command tool, this directory will be used."
    )]
    async fn change_working_directory(
        &self,
        Parameters(params): Parameters<ChangeWorkingDirectoryParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(handlers::change_working_directory(&self.gateway, params).await)
    }
}

// ============================================================================
// Server Handler Implementation
// ============================================================================

// Hand-written instead of `#[tool_handler]`: `list_tools` includes the live allow-list.
impl rmcp::ServerHandler for CommandExecutorServer {
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let tcc = ToolCallContext::new(self, request, context);
        self.tool_router.call(tcc).await
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tools().await,
            meta: None,
            next_cursor: None,
        })
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Command execution MCP server. Commands run only if their first word \
                 is on the allow list; use add_allow_command to extend it. Commands run \
                 locally, in a Docker container or in WSL depending on server configuration."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

// ============================================================================
// EmbeddableMcp Implementation
// ============================================================================

#[async_trait]
impl EmbeddableMcp for CommandExecutorServer {
    fn server_name(&self) -> &str {
        "command-executor"
    }

    fn server_description(&self) -> Option<&str> {
        Some(
            "Runs allow-listed shell commands on the host, in a Docker container, \
             or in a WSL distribution.",
        )
    }

    async fn list_tools(&self) -> Vec<Tool> {
        self.tools().await
    }

    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult> {
        match name {
            "execute_command" => {
                let params: ExecuteCommandParams = serde_json::from_value(params)?;
                self.execute_command(Parameters(params)).await.map_err(Into::into)
            }

            "add_allow_command" => {
                let params: AddAllowCommandParams = serde_json::from_value(params)?;
                self.add_allow_command(Parameters(params)).await.map_err(Into::into)
            }

            "change_working_directory" => {
                let params: ChangeWorkingDirectoryParams = serde_json::from_value(params)?;
                self.change_working_directory(Parameters(params))
                    .await
                    .map_err(Into::into)
            }

            _ => Err(EmbeddableError::ToolNotFound(name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn execute_description(tools: &[Tool]) -> String {
        tools
            .iter()
            .find(|t| t.name == "execute_command")
            .and_then(|t| t.description.as_deref())
            .unwrap_or_default()
            .to_string()
    }

    #[tokio::test]
    async fn test_embeddable_list_tools() {
        let server = CommandExecutorServer::from_options(&ServerOptions::default()).unwrap();
        let tools = server.list_tools().await;

        let mut names: Vec<&str> = tools.iter().map(|t| t.name.as_ref()).collect();
        names.sort();
        assert_eq!(
            names,
            vec!["add_allow_command", "change_working_directory", "execute_command"]
        );
        assert_eq!(server.server_name(), "command-executor");
    }

    #[tokio::test]
    async fn test_execute_description_tracks_allow_list() {
        let server = CommandExecutorServer::from_options(&ServerOptions::default()).unwrap();

        let before = execute_description(&server.list_tools().await);
        assert!(before.starts_with("Execute a pre-approved command."));
        assert!(before.contains("Valid commands include: "));
        assert!(before.contains("git"));
        assert!(!before.contains("echo"));

        server
            .call_tool("add_allow_command", serde_json::json!({ "command": "echo" }))
            .await
            .unwrap();

        let after = execute_description(&server.list_tools().await);
        assert!(after.contains("echo"));

        let other = server
            .tools()
            .await
            .into_iter()
            .find(|t| t.name == "add_allow_command")
            .and_then(|t| t.description)
            .unwrap_or_default();
        assert!(!other.contains("Valid commands include"));
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let server = CommandExecutorServer::from_options(&ServerOptions::default()).unwrap();
        let result = server.call_tool("run_script", serde_json::json!({})).await;
        assert!(matches!(result, Err(EmbeddableError::ToolNotFound(_))));
    }

    #[tokio::test]
    async fn test_missing_required_param() {
        let server = CommandExecutorServer::from_options(&ServerOptions::default()).unwrap();
        let result = server
            .call_tool("execute_command", serde_json::json!({ "workingDirectory": "/tmp" }))
            .await;
        assert!(matches!(result, Err(EmbeddableError::InvalidParams(_))));
    }
}
