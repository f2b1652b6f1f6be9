//! Handler for the `authenticate` tool.
//!
//! Runs the Box JWT-bearer flow: sign an assertion with the caller's key,
//! exchange it at the token endpoint, and store the resulting access token.

use chrono::{DateTime, Utc};
use rmcp::model::JsonObject;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::info;

use crate::auth::Credentials;
use crate::box_api::BoxClient;
use crate::error::BoxResult;
use crate::session::TokenOrigin;
use crate::tools::envelope::{into_envelope, parse_args, require_non_empty};
use crate::tools::{ToolContext, ToolFuture, ToolHandler};

/// Token metadata reported back to the caller. The token itself is not echoed.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticateOutput {
    pub status: &'static str,
    pub token_type: Option<String>,
    pub expires_in: Option<u64>,
    pub expires_at: Option<DateTime<Utc>>,
    pub restricted_to: Option<Value>,
}

/// Exchange `credentials` for a token and make it the session's active token.
pub async fn authenticate(client: &BoxClient, credentials: &Credentials) -> BoxResult<AuthenticateOutput> {
    let token = client.exchange_assertion(credentials).await?;
    let expires_at = client
        .session()
        .set_token(token.access_token, token.expires_in, TokenOrigin::Jwt)
        .await;

    info!(
        subject_type = credentials.subject_type.as_str(),
        expires_in = ?token.expires_in,
        "Authenticated with Box via JWT"
    );

    Ok(AuthenticateOutput {
        status: "authenticated",
        token_type: token.token_type,
        expires_in: token.expires_in,
        expires_at,
        restricted_to: token.restricted_to,
    })
}

/// Handler for the `authenticate` tool.
pub struct AuthenticateHandler;

impl ToolHandler for AuthenticateHandler {
    fn name(&self) -> &str {
        "authenticate"
    }

    fn title(&self) -> Option<&str> {
        Some("Box: Authenticate (JWT)")
    }

    fn description(&self) -> &str {
        "Authenticate with Box using JWT server authentication. Signs an assertion with the \
         app's private key, exchanges it for an access token and keeps that token in memory \
         for the other tools."
    }

    fn input_schema(&self) -> JsonObject {
        let mut schema = JsonObject::new();
        schema.insert("type".to_string(), json!("object"));

        let mut properties = serde_json::Map::new();
        properties.insert(
            "clientId".to_string(),
            json!({ "type": "string", "description": "Box app client ID." }),
        );
        properties.insert(
            "clientSecret".to_string(),
            json!({ "type": "string", "description": "Box app client secret." }),
        );
        properties.insert(
            "privateKey".to_string(),
            json!({
                "type": "string",
                "description": "RSA private key in PEM format. Escaped \\n sequences are accepted."
            }),
        );
        properties.insert(
            "publicKeyId".to_string(),
            json!({ "type": "string", "description": "ID of the public key registered with the Box app." }),
        );
        properties.insert(
            "subjectType".to_string(),
            json!({
                "type": "string",
                "enum": ["user", "enterprise"],
                "description": "Whether to authenticate as a user or as the enterprise service account."
            }),
        );
        properties.insert(
            "subjectId".to_string(),
            json!({ "type": "string", "description": "Box user ID or enterprise ID." }),
        );

        schema.insert("properties".to_string(), json!(properties));
        schema.insert(
            "required".to_string(),
            json!([
                "clientId",
                "clientSecret",
                "privateKey",
                "publicKeyId",
                "subjectType",
                "subjectId"
            ]),
        );
        schema
    }

    fn execute<'a>(&'a self, args: JsonObject, ctx: &'a ToolContext) -> ToolFuture<'a> {
        Box::pin(async move {
            let credentials: Credentials = parse_args(self.name(), args)?;
            require_non_empty(self.name(), "clientId", &credentials.client_id)?;
            require_non_empty(self.name(), "privateKey", &credentials.private_key)?;
            require_non_empty(self.name(), "publicKeyId", &credentials.public_key_id)?;
            require_non_empty(self.name(), "subjectId", &credentials.subject_id)?;

            Ok(into_envelope(authenticate(&ctx.client, &credentials).await))
        })
    }
}
