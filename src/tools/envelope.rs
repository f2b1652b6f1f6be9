//! Conversion between tool arguments/results and the MCP wire shapes.
//!
//! Every handler answers with `{content: [{type: "text", text}], isError?}`.
//! Success carries pretty-printed JSON; failure carries the error message.

use rmcp::model::{CallToolResult, Content, JsonObject};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::BoxResult;
use crate::tools::ToolError;

/// Successful envelope carrying `value` as JSON text.
pub fn json_result<T: Serialize>(value: &T) -> CallToolResult {
    match serde_json::to_string_pretty(value) {
        Ok(text) => CallToolResult {
            content: vec![Content::text(text)],
            structured_content: None,
            is_error: None,
            meta: None,
        },
        Err(e) => error_result(format!("Error: failed to serialize result: {}", e)),
    }
}

/// Error envelope carrying a human-readable message.
pub fn error_result(message: impl Into<String>) -> CallToolResult {
    CallToolResult {
        content: vec![Content::text(message.into())],
        structured_content: None,
        is_error: Some(true),
        meta: None,
    }
}

/// Render a handler outcome at the tool boundary.
pub fn into_envelope<T: Serialize>(result: BoxResult<T>) -> CallToolResult {
    match result {
        Ok(value) => json_result(&value),
        Err(e) => {
            tracing::warn!(error = %e, "Tool call failed");
            error_result(format!("Error: {}", e))
        }
    }
}

/// Deserialize raw tool arguments into the handler's typed input.
pub fn parse_args<T: DeserializeOwned>(tool: &str, args: JsonObject) -> Result<T, ToolError> {
    serde_json::from_value(serde_json::Value::Object(args))
        .map_err(|e| ToolError::invalid_arguments(tool, e.to_string()))
}

/// Reject blank strings for required fields.
pub fn require_non_empty(tool: &str, field: &str, value: &str) -> Result<(), ToolError> {
    if value.trim().is_empty() {
        return Err(ToolError::invalid_arguments(
            tool,
            format!("`{}` must not be empty", field),
        ));
    }
    Ok(())
}

/// Box ids are embedded in URL paths, so they must be non-empty and free of
/// path or query delimiters.
pub fn require_item_id(tool: &str, field: &str, value: &str) -> Result<(), ToolError> {
    require_non_empty(tool, field, value)?;
    if value.contains(['/', '?', '#', '&']) || value.chars().any(char::is_whitespace) {
        return Err(ToolError::invalid_arguments(
            tool,
            format!("`{}` is not a valid Box id: {:?}", field, value),
        ));
    }
    Ok(())
}
