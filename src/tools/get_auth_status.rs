//! Handler for the `get-auth-status` tool.

use rmcp::model::JsonObject;
use serde_json::json;

use crate::tools::envelope::json_result;
use crate::tools::{ToolContext, ToolFuture, ToolHandler};

/// Handler for the `get-auth-status` tool.
pub struct GetAuthStatusHandler;

impl ToolHandler for GetAuthStatusHandler {
    fn name(&self) -> &str {
        "get-auth-status"
    }

    fn title(&self) -> Option<&str> {
        Some("Box: Authentication Status")
    }

    fn description(&self) -> &str {
        "Report whether a Box access token is active, where it came from \
         (jwt, manual, environment or none) and how long it remains valid."
    }

    fn input_schema(&self) -> JsonObject {
        let mut schema = JsonObject::new();
        schema.insert("type".to_string(), json!("object"));
        schema.insert("properties".to_string(), json!({}));
        schema
    }

    fn execute<'a>(&'a self, _args: JsonObject, ctx: &'a ToolContext) -> ToolFuture<'a> {
        Box::pin(async move { Ok(json_result(&ctx.session().status().await)) })
    }
}
