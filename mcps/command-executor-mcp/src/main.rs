//! Command Executor MCP - allow-listed shell command execution over stdio

use clap::Parser;
use command_executor_mcp::{Cli, CommandExecutorServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    mcp_common::init_tracing("command_executor_mcp")?;

    tracing::info!("Starting command_executor_mcp MCP Server");

    let options = cli.into_options()?;
    let server = CommandExecutorServer::from_options(&options)?;

    mcp_common::serve_stdio(server).await
}
