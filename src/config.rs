//! Runtime configuration for the Box API connection.

use serde::{Deserialize, Serialize};

/// Production Box content API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.box.com/2.0";

/// Production Box OAuth2 token endpoint. Also used as the JWT `aud` claim.
pub const DEFAULT_TOKEN_URL: &str = "https://api.box.com/oauth2/token";

/// Environment variable holding the optional fallback bearer token, read once at startup.
pub const DEVELOPER_TOKEN_ENV: &str = "BOX_DEVELOPER_TOKEN";

/// Connection settings shared by the API client and the token store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxConfig {
    /// Base URL that API paths such as `/files/123` are appended to
    pub api_base: String,
    /// Token endpoint for the JWT-bearer exchange
    pub token_url: String,
    /// Statically configured token used when nothing has been stored
    #[serde(default, skip_serializing)]
    pub developer_token: Option<String>,
}

impl Default for BoxConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            developer_token: None,
        }
    }
}

impl BoxConfig {
    /// Point both the API base and the token endpoint at another host.
    ///
    /// Used by tests and by Box-compatible proxies.
    pub fn with_endpoints(api_base: impl Into<String>, token_url: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            token_url: token_url.into(),
            developer_token: None,
        }
        .normalized()
    }

    /// Set the fallback token.
    pub fn with_developer_token(mut self, token: impl Into<String>) -> Self {
        self.developer_token = Some(token.into());
        self.normalized()
    }

    /// Strip trailing slashes from the base URL and drop blank fallback tokens.
    pub fn normalized(mut self) -> Self {
        while self.api_base.ends_with('/') {
            self.api_base.pop();
        }
        if self
            .developer_token
            .as_deref()
            .is_some_and(|t| t.trim().is_empty())
        {
            self.developer_token = None;
        }
        self
    }
}
