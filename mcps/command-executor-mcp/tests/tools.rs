//! End-to-end tool calls against a local-backend server
//!
//! Runs real processes through `/bin/sh`, so these only build on Unix.

#![cfg(unix)]

use command_executor_mcp::{CommandExecutorServer, ServerOptions};
use mcp_common::{first_text, CallToolResult, EmbeddableMcp};
use serde_json::json;
use tempfile::TempDir;

fn server_in(dir: &TempDir) -> CommandExecutorServer {
    let options = ServerOptions {
        working_directory: Some(dir.path().to_string_lossy().into_owned()),
        ..Default::default()
    };
    CommandExecutorServer::from_options(&options).expect("local server should build")
}

fn is_error(result: &CallToolResult) -> bool {
    result.is_error.unwrap_or(false)
}

fn text(result: &CallToolResult) -> &str {
    first_text(result).unwrap_or_default()
}

#[tokio::test]
async fn test_ls_lists_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("hello.py"), "print('hi')\n").unwrap();
    let server = server_in(&dir);

    let result = server
        .call_tool(
            "execute_command",
            json!({ "command": "ls", "workingDirectory": dir.path() }),
        )
        .await
        .unwrap();

    assert!(!is_error(&result));
    assert!(text(&result).contains("hello.py"));
}

#[tokio::test]
async fn test_disallowed_command_is_soft_error() {
    let dir = tempfile::tempdir().unwrap();
    let server = server_in(&dir);

    let result = server
        .call_tool("execute_command", json!({ "command": "rm -rf /" }))
        .await
        .unwrap();

    assert!(is_error(&result));
    let message = text(&result);
    assert!(message.starts_with("Command not allowed: rm -rf /."));
    assert!(message.contains("Allowed commands: "));
    assert!(message.contains("git"));
}

#[tokio::test]
async fn test_change_directory_then_execute_without_directory() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    std::fs::write(second.path().join("moved-here.txt"), "").unwrap();
    let server = server_in(&first);

    let changed = server
        .call_tool(
            "change_working_directory",
            json!({ "workingDirectory": second.path() }),
        )
        .await
        .unwrap();
    assert!(!is_error(&changed));
    assert!(text(&changed).starts_with("Working directory changed to \""));

    let listed = server
        .call_tool("execute_command", json!({ "command": "ls" }))
        .await
        .unwrap();
    assert!(!is_error(&listed));
    assert!(text(&listed).contains("moved-here.txt"));
}

#[tokio::test]
async fn test_add_allow_command_twice() {
    let dir = tempfile::tempdir().unwrap();
    let server = server_in(&dir);

    let denied = server
        .call_tool("execute_command", json!({ "command": "echo hi" }))
        .await
        .unwrap();
    assert!(is_error(&denied));

    let added = server
        .call_tool("add_allow_command", json!({ "command": "echo" }))
        .await
        .unwrap();
    assert!(!is_error(&added));
    assert_eq!(text(&added), "Command \"echo\" added to the allow list.");
    assert_eq!(added.content.len(), 2);

    let again = server
        .call_tool("add_allow_command", json!({ "command": "echo" }))
        .await
        .unwrap();
    assert!(!is_error(&again));
    assert_eq!(text(&again), "Command \"echo\" is already in the allow list.");

    let ran = server
        .call_tool("execute_command", json!({ "command": "echo \"hi there\"" }))
        .await
        .unwrap();
    assert!(!is_error(&ran));
    assert_eq!(text(&ran), "hi there\n");
}

#[tokio::test]
async fn test_nonzero_exit_is_reported_as_failure() {
    let dir = tempfile::tempdir().unwrap();
    let server = server_in(&dir);

    let result = server
        .call_tool(
            "execute_command",
            json!({ "command": "ls definitely-missing-entry" }),
        )
        .await
        .unwrap();

    assert!(is_error(&result));
    let message = text(&result);
    assert!(message.starts_with("Command execution failed: exited with status"));
    assert!(message.contains("definitely-missing-entry"));
}

#[tokio::test]
async fn test_missing_directory_is_launch_failure() {
    let dir = tempfile::tempdir().unwrap();
    let server = server_in(&dir);
    let missing = dir.path().join("gone");

    let result = server
        .call_tool(
            "execute_command",
            json!({ "command": "ls", "workingDirectory": missing }),
        )
        .await
        .unwrap();

    assert!(is_error(&result));
    assert!(text(&result).starts_with("Command execution failed: failed to launch"));
}

#[tokio::test]
async fn test_invalid_directory_change_is_soft_error() {
    let dir = tempfile::tempdir().unwrap();
    let server = server_in(&dir);

    let result = server
        .call_tool(
            "change_working_directory",
            json!({ "workingDirectory": "bad\u{0}dir" }),
        )
        .await
        .unwrap();

    assert!(is_error(&result));
    assert!(text(&result).starts_with("Failed to change working directory:"));
    assert_eq!(server.gateway().working_directory().await, dir.path());
}
