//! Result helpers for MCP tool responses
//!
//! Tool failures that the caller should see as data (rather than as a
//! protocol fault) are built with [`text_error`], which sets `is_error`.

use rmcp::model::{CallToolResult, Content, RawContent};

/// Create a successful plain text response
pub fn text_success(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

/// Create a successful response made of several text items, in order
pub fn multi_text_success<I, S>(texts: I) -> CallToolResult
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    CallToolResult::success(texts.into_iter().map(|t| Content::text(t.into())).collect())
}

/// Create a soft error: a normal tool result flagged with `is_error`
pub fn text_error(text: impl Into<String>) -> CallToolResult {
    CallToolResult::error(vec![Content::text(text.into())])
}

/// First text item of a result, if any
pub fn first_text(result: &CallToolResult) -> Option<&str> {
    result.content.iter().find_map(|c| match &c.raw {
        RawContent::Text(t) => Some(t.text.as_str()),
        _ => None,
    })
}
