//! HTTP client for the Box content API.

use std::sync::Arc;

use reqwest::{Method, Response, StatusCode, header};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::auth::{Credentials, build_assertion};
use crate::box_api::types::{
    BoxFile, ExtractRequest, ExtractStructuredRequest, FILE_INFO_FIELDS, FileInfo,
    JWT_BEARER_GRANT, TokenRequest, TokenResponse,
};
use crate::config::BoxConfig;
use crate::error::{BoxError, BoxResult};
use crate::session::Session;

/// Box API client bound to a session.
///
/// Every call resolves the session's active token first; without one the
/// call fails with [`BoxError::Unauthenticated`] and nothing is sent.
/// Cheap to clone.
#[derive(Clone)]
pub struct BoxClient {
    http: reqwest::Client,
    config: Arc<BoxConfig>,
    session: Arc<Session>,
}

impl BoxClient {
    pub fn new(config: BoxConfig, session: Arc<Session>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config: Arc::new(config),
            session,
        }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn config(&self) -> &BoxConfig {
        &self.config
    }

    /// Issue an authenticated request to `api_base + path` and return the JSON body.
    pub async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> BoxResult<Value> {
        let token = self
            .session
            .active_token()
            .await
            .ok_or(BoxError::Unauthenticated)?;

        let url = format!("{}{}", self.config.api_base, path);
        debug!(%method, %path, "Box API request");

        let mut builder = self
            .http
            .request(method, &url)
            .bearer_auth(token)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let (status_text, body) = failure_parts(status, response).await;
            warn!(status = status.as_u16(), %path, "Box API returned an error");
            return Err(BoxError::Api {
                status: status.as_u16(),
                status_text,
                body,
            });
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| BoxError::Decode(e.to_string()))
    }

    pub async fn get(&self, path: &str) -> BoxResult<Value> {
        self.request::<()>(Method::GET, path, None).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> BoxResult<Value> {
        self.request(Method::POST, path, Some(body)).await
    }

    /// Sign an assertion for `credentials` and trade it for an access token.
    ///
    /// Does not touch the session; storing the token is the caller's job.
    pub async fn exchange_assertion(&self, credentials: &Credentials) -> BoxResult<TokenResponse> {
        let assertion = build_assertion(credentials, &self.config.token_url)?;
        debug!(
            client_id = %credentials.client_id,
            subject_type = credentials.subject_type.as_str(),
            "Exchanging JWT assertion for access token"
        );

        let form = TokenRequest {
            grant_type: JWT_BEARER_GRANT,
            assertion: &assertion,
            client_id: &credentials.client_id,
            client_secret: &credentials.client_secret,
        };

        let response = self
            .http
            .post(&self.config.token_url)
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let (status_text, body) = failure_parts(status, response).await;
            warn!(status = status.as_u16(), "Token endpoint rejected the assertion");
            return Err(BoxError::AuthFailed {
                status: status.as_u16(),
                status_text,
                body,
            });
        }

        Ok(response.json::<TokenResponse>().await?)
    }

    /// `POST /ai/extract`
    pub async fn extract_freeform(&self, request: &ExtractRequest) -> BoxResult<Value> {
        self.post("/ai/extract", request).await
    }

    /// `POST /ai/extract_structured`
    pub async fn extract_structured(&self, request: &ExtractStructuredRequest) -> BoxResult<Value> {
        self.post("/ai/extract_structured", request).await
    }

    /// `GET /files/{id}`, reshaped into [`FileInfo`].
    pub async fn file_info(&self, file_id: &str) -> BoxResult<FileInfo> {
        let path = format!("/files/{}?fields={}", file_id, FILE_INFO_FIELDS);
        let value = self.get(&path).await?;
        let file: BoxFile =
            serde_json::from_value(value).map_err(|e| BoxError::Decode(e.to_string()))?;
        Ok(file.into())
    }
}

async fn failure_parts(status: StatusCode, response: Response) -> (String, String) {
    let status_text = status.canonical_reason().unwrap_or_default().to_string();
    let body = response
        .text()
        .await
        .unwrap_or_else(|e| format!("<unreadable body: {}>", e));
    (status_text, body)
}
