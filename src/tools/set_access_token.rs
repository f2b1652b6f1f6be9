//! Handler for the `set-access-token` tool.
//!
//! Stores a caller-supplied access token (e.g. a developer token) directly,
//! bypassing the JWT flow.

use chrono::{DateTime, Utc};
use rmcp::model::JsonObject;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::session::{TokenOrigin, TokenSource};
use crate::tools::envelope::{json_result, parse_args, require_non_empty};
use crate::tools::{ToolContext, ToolFuture, ToolHandler};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetAccessTokenArgs {
    access_token: String,
    /// Seconds until the token expires; omitted means it never expires locally
    #[serde(default)]
    expires_in: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SetAccessTokenOutput {
    status: &'static str,
    token_source: TokenSource,
    expires_at: Option<DateTime<Utc>>,
}

/// Handler for the `set-access-token` tool.
pub struct SetAccessTokenHandler;

impl ToolHandler for SetAccessTokenHandler {
    fn name(&self) -> &str {
        "set-access-token"
    }

    fn title(&self) -> Option<&str> {
        Some("Box: Set Access Token")
    }

    fn description(&self) -> &str {
        "Store a Box access token (for example a developer token) for subsequent calls, \
         replacing any token obtained earlier."
    }

    fn input_schema(&self) -> JsonObject {
        let mut schema = JsonObject::new();
        schema.insert("type".to_string(), json!("object"));

        let mut properties = serde_json::Map::new();
        properties.insert(
            "accessToken".to_string(),
            json!({ "type": "string", "description": "Box access token." }),
        );
        properties.insert(
            "expiresIn".to_string(),
            json!({
                "type": "integer",
                "minimum": 0,
                "description": "Seconds until the token expires. Omit for a token without a known expiry."
            }),
        );

        schema.insert("properties".to_string(), json!(properties));
        schema.insert("required".to_string(), json!(["accessToken"]));
        schema
    }

    fn execute<'a>(&'a self, args: JsonObject, ctx: &'a ToolContext) -> ToolFuture<'a> {
        Box::pin(async move {
            let args: SetAccessTokenArgs = parse_args(self.name(), args)?;
            require_non_empty(self.name(), "accessToken", &args.access_token)?;

            let expires_at = ctx
                .session()
                .set_token(args.access_token.trim(), args.expires_in, TokenOrigin::Manual)
                .await;
            info!(expires_in = ?args.expires_in, "Access token set manually");

            Ok(json_result(&SetAccessTokenOutput {
                status: "stored",
                token_source: TokenSource::Manual,
                expires_at,
            }))
        })
    }
}
