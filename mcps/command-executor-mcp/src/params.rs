//! Parameter types for command executor tools

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteCommandParams {
    #[schemars(description = "Command to execute (e.g., \"git clone\", \"ls -la\", \"npm install\")")]
    pub command: String,

    #[schemars(description = "Working directory for command execution (optional, defaults to the server's working directory)")]
    #[serde(default)]
    pub working_directory: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AddAllowCommandParams {
    #[schemars(description = "Command to allow (e.g., \"curl\")")]
    pub command: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangeWorkingDirectoryParams {
    #[schemars(description = "Path to the new working directory (e.g., \"/tmp/work\")")]
    pub working_directory: String,
}
