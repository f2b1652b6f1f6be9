//! Handler for the `get-file-info` tool.

use rmcp::model::JsonObject;
use serde::Deserialize;
use serde_json::json;

use crate::tools::envelope::{into_envelope, parse_args, require_item_id};
use crate::tools::{ToolContext, ToolFuture, ToolHandler};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetFileInfoArgs {
    file_id: String,
}

/// Handler for the `get-file-info` tool.
pub struct GetFileInfoHandler;

impl ToolHandler for GetFileInfoHandler {
    fn name(&self) -> &str {
        "get-file-info"
    }

    fn title(&self) -> Option<&str> {
        Some("Box: File Info")
    }

    fn description(&self) -> &str {
        "Get information about a Box file: id, name, size, type, timestamps, description, \
         parent folder, path and shared link."
    }

    fn input_schema(&self) -> JsonObject {
        let mut schema = JsonObject::new();
        schema.insert("type".to_string(), json!("object"));

        let mut properties = serde_json::Map::new();
        properties.insert(
            "fileId".to_string(),
            json!({ "type": "string", "description": "ID of the Box file." }),
        );

        schema.insert("properties".to_string(), json!(properties));
        schema.insert("required".to_string(), json!(["fileId"]));
        schema
    }

    fn execute<'a>(&'a self, args: JsonObject, ctx: &'a ToolContext) -> ToolFuture<'a> {
        Box::pin(async move {
            let args: GetFileInfoArgs = parse_args(self.name(), args)?;
            require_item_id(self.name(), "fileId", &args.file_id)?;

            Ok(into_envelope(ctx.client.file_info(&args.file_id).await))
        })
    }
}
