//! Tool handlers
//!
//! Every request-time failure is returned as a soft error (`is_error` set on
//! an ordinary result), never as a protocol-level fault.

use mcp_common::{multi_text_success, text_error, text_success, CallToolResult};

use crate::gateway::{AllowOutcome, CommandGateway};
use crate::params::*;
use crate::types::{ExecutionResult, GatewayError};

const TRUNCATED_NOTE: &str = "[output truncated]";

/// Text shown for a successful run
fn render_output(result: &ExecutionResult) -> String {
    let text = result.output_text();
    if !result.truncated {
        return text.to_string();
    }
    if text.is_empty() || text.ends_with('\n') {
        format!("{}{}", text, TRUNCATED_NOTE)
    } else {
        format!("{}\n{}", text, TRUNCATED_NOTE)
    }
}

pub async fn execute_command(
    gateway: &CommandGateway,
    params: ExecuteCommandParams,
) -> CallToolResult {
    match gateway
        .execute_command(&params.command, params.working_directory.as_deref())
        .await
    {
        Ok(result) => text_success(render_output(&result)),
        Err(err @ GatewayError::NotAllowed { .. }) => text_error(err.to_string()),
        Err(err) => text_error(format!("Command execution failed: {}", err)),
    }
}

pub async fn add_allow_command(
    gateway: &CommandGateway,
    params: AddAllowCommandParams,
) -> CallToolResult {
    match gateway.add_allowed_command(&params.command).await {
        AllowOutcome::Added(allowed) => multi_text_success([
            format!("Command \"{}\" added to the allow list.", params.command),
            format!("Current allow list: {}", allowed.join(", ")),
        ]),
        AllowOutcome::AlreadyPresent => text_success(format!(
            "Command \"{}\" is already in the allow list.",
            params.command
        )),
    }
}

pub async fn change_working_directory(
    gateway: &CommandGateway,
    params: ChangeWorkingDirectoryParams,
) -> CallToolResult {
    match gateway
        .change_working_directory(&params.working_directory)
        .await
    {
        Ok(resolved) => text_success(format!(
            "Working directory changed to \"{}\".",
            resolved.display()
        )),
        Err(err) => text_error(format!("Failed to change working directory: {}", err)),
    }
}
