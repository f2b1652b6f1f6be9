//! Handler for the `extract-metadata` tool.
//!
//! Freeform Box AI extraction: the model answers a natural-language prompt
//! about one file.

use rmcp::model::JsonObject;
use serde::Deserialize;
use serde_json::json;

use crate::box_api::ExtractRequest;
use crate::tools::envelope::{into_envelope, parse_args, require_item_id, require_non_empty};
use crate::tools::{ToolContext, ToolFuture, ToolHandler};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExtractMetadataArgs {
    file_id: String,
    prompt: String,
    #[serde(default)]
    format: Option<String>,
}

/// Handler for the `extract-metadata` tool.
pub struct ExtractMetadataHandler;

impl ToolHandler for ExtractMetadataHandler {
    fn name(&self) -> &str {
        "extract-metadata"
    }

    fn title(&self) -> Option<&str> {
        Some("Box AI: Extract Metadata")
    }

    fn description(&self) -> &str {
        "Extract metadata from a Box file with Box AI using a natural-language prompt. \
         Returns the raw Box AI response."
    }

    fn input_schema(&self) -> JsonObject {
        let mut schema = JsonObject::new();
        schema.insert("type".to_string(), json!("object"));

        let mut properties = serde_json::Map::new();
        properties.insert(
            "fileId".to_string(),
            json!({ "type": "string", "description": "ID of the Box file to extract from." }),
        );
        properties.insert(
            "prompt".to_string(),
            json!({
                "type": "string",
                "description": "What to extract, e.g. 'the contract parties and effective date'."
            }),
        );
        properties.insert(
            "format".to_string(),
            json!({
                "type": "string",
                "description": "Optional output format for the answer, e.g. 'JSON' or 'key-value pairs'."
            }),
        );

        schema.insert("properties".to_string(), json!(properties));
        schema.insert("required".to_string(), json!(["fileId", "prompt"]));
        schema
    }

    fn execute<'a>(&'a self, args: JsonObject, ctx: &'a ToolContext) -> ToolFuture<'a> {
        Box::pin(async move {
            let args: ExtractMetadataArgs = parse_args(self.name(), args)?;
            require_item_id(self.name(), "fileId", &args.file_id)?;
            require_non_empty(self.name(), "prompt", &args.prompt)?;

            let request = ExtractRequest::new(&args.file_id, &args.prompt, args.format.as_deref());
            Ok(into_envelope(ctx.client.extract_freeform(&request).await))
        })
    }
}
