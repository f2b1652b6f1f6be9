//! Handler for the `extract-structured-metadata` tool.
//!
//! Structured Box AI extraction against either explicit field definitions or
//! an enterprise metadata template. When both are given, the template wins
//! and the fields are not sent.

use rmcp::model::JsonObject;
use serde::Deserialize;
use serde_json::json;

use crate::box_api::{ExtractStructuredRequest, FieldDefinition};
use crate::tools::envelope::{into_envelope, parse_args, require_item_id};
use crate::tools::{ToolContext, ToolError, ToolFuture, ToolHandler};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExtractStructuredArgs {
    file_id: String,
    #[serde(default)]
    fields: Option<Vec<FieldDefinition>>,
    #[serde(default)]
    template_id: Option<String>,
}

impl ExtractStructuredArgs {
    fn into_request(self, tool: &str) -> Result<ExtractStructuredRequest, ToolError> {
        let template_id = self
            .template_id
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty());
        let fields = self.fields.filter(|f| !f.is_empty());

        if template_id.is_none() && fields.is_none() {
            return Err(ToolError::invalid_arguments(
                tool,
                "either `fields` or `templateId` must be provided",
            ));
        }
        if let Some(field) = fields.iter().flatten().find(|f| f.key.trim().is_empty()) {
            return Err(ToolError::invalid_arguments(
                tool,
                format!("field definition without a key: {:?}", field),
            ));
        }

        Ok(ExtractStructuredRequest::new(&self.file_id, fields, template_id))
    }
}

/// Handler for the `extract-structured-metadata` tool.
pub struct ExtractStructuredMetadataHandler;

impl ToolHandler for ExtractStructuredMetadataHandler {
    fn name(&self) -> &str {
        "extract-structured-metadata"
    }

    fn title(&self) -> Option<&str> {
        Some("Box AI: Extract Structured Metadata")
    }

    fn description(&self) -> &str {
        "Extract structured metadata from a Box file with Box AI, using either a list of \
         field definitions or the key of an enterprise metadata template. If both are \
         supplied the template is used."
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
            "fields".to_string(),
            json!({
                "type": "array",
                "description": "Fields to extract.",
                "items": {
                    "type": "object",
                    "properties": {
                        "key": { "type": "string", "description": "Unique field key." },
                        "type": {
                            "type": "string",
                            "enum": ["string", "float", "date", "enum", "multiSelect"],
                            "description": "Field type."
                        },
                        "displayName": { "type": "string" },
                        "description": { "type": "string" },
                        "prompt": { "type": "string", "description": "Extra guidance for the model." },
                        "options": {
                            "type": "array",
                            "description": "Allowed values for enum and multiSelect fields.",
                            "items": {
                                "type": "object",
                                "properties": { "key": { "type": "string" } },
                                "required": ["key"]
                            }
                        }
                    },
                    "required": ["key"]
                }
            }),
        );
        properties.insert(
            "templateId".to_string(),
            json!({
                "type": "string",
                "description": "Key of an enterprise metadata template. Takes precedence over `fields`."
            }),
        );

        schema.insert("properties".to_string(), json!(properties));
        schema.insert("required".to_string(), json!(["fileId"]));
        schema
    }

    fn execute<'a>(&'a self, args: JsonObject, ctx: &'a ToolContext) -> ToolFuture<'a> {
        Box::pin(async move {
            let args: ExtractStructuredArgs = parse_args(self.name(), args)?;
            require_item_id(self.name(), "fileId", &args.file_id)?;
            let request = args.into_request(self.name())?;

            Ok(into_envelope(ctx.client.extract_structured(&request).await))
        })
    }
}
