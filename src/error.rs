//! Error types for Box API operations.

use std::fmt;

/// Failures that can occur while talking to Box or preparing a request.
///
/// Tool handlers never propagate these to the host; they are rendered into
/// an error envelope at the tool boundary.
#[derive(Debug, Clone)]
pub enum BoxError {
    /// No stored token and no fallback token configured, or the stored one expired
    Unauthenticated,
    /// The token endpoint rejected the JWT assertion
    AuthFailed {
        status: u16,
        status_text: String,
        body: String,
    },
    /// A Box API endpoint returned a non-success status
    Api {
        status: u16,
        status_text: String,
        body: String,
    },
    /// The request never produced an HTTP response
    Transport(String),
    /// The private key could not be parsed or used for signing
    InvalidKey(String),
    /// The response body was not the JSON we expected
    Decode(String),
}

impl fmt::Display for BoxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthenticated => write!(
                f,
                "Not authenticated. Call the authenticate or set-access-token tool first."
            ),
            Self::AuthFailed {
                status,
                status_text,
                body,
            } => write!(
                f,
                "Authentication failed: {} {} - {}",
                status, status_text, body
            ),
            Self::Api {
                status,
                status_text,
                body,
            } => write!(f, "Box API error: {} {} - {}", status, status_text, body),
            Self::Transport(msg) => write!(f, "Request failed: {}", msg),
            Self::InvalidKey(msg) => write!(f, "Invalid private key: {}", msg),
            Self::Decode(msg) => write!(f, "Unexpected response from Box: {}", msg),
        }
    }
}

impl std::error::Error for BoxError {}

impl From<reqwest::Error> for BoxError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<jsonwebtoken::errors::Error> for BoxError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Self::InvalidKey(err.to_string())
    }
}

/// Result type for Box API operations.
pub type BoxResult<T> = Result<T, BoxError>;
