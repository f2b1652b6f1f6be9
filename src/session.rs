//! In-memory token store for the Box session.
//!
//! Holds at most one access token. Writes always replace the previous token
//! in full; reads drop a token once it is within [`EXPIRY_MARGIN_SECONDS`]
//! of expiring and fall back to the configured developer token.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

/// Tokens this close to expiry are treated as already expired.
pub const EXPIRY_MARGIN_SECONDS: i64 = 300;

/// How a stored token got into the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenOrigin {
    /// Obtained through the JWT-bearer exchange
    Jwt,
    /// Supplied directly by the caller
    Manual,
}

/// Where the currently active token comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenSource {
    Jwt,
    Manual,
    Environment,
    None,
}

impl From<TokenOrigin> for TokenSource {
    fn from(origin: TokenOrigin) -> Self {
        match origin {
            TokenOrigin::Jwt => Self::Jwt,
            TokenOrigin::Manual => Self::Manual,
        }
    }
}

#[derive(Debug, Clone)]
struct StoredToken {
    value: String,
    expires_at: Option<DateTime<Utc>>,
    origin: TokenOrigin,
}

impl StoredToken {
    fn is_usable_at(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            None => true,
            Some(expires_at) => now < expires_at - TimeDelta::seconds(EXPIRY_MARGIN_SECONDS),
        }
    }
}

/// Snapshot of the session reported by `get-auth-status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthStatus {
    pub authenticated: bool,
    pub token_source: TokenSource,
    pub expires_at: Option<DateTime<Utc>>,
    pub expires_in_seconds: Option<i64>,
}

struct ResolvedToken {
    value: String,
    source: TokenSource,
    expires_at: Option<DateTime<Utc>>,
}

/// Process-wide session state, shared by reference with every tool.
#[derive(Debug, Default)]
pub struct Session {
    stored: RwLock<Option<StoredToken>>,
    fallback: Option<String>,
}

impl Session {
    /// Create an empty session with an optional fallback token.
    pub fn new(fallback: Option<String>) -> Self {
        Self {
            stored: RwLock::new(None),
            fallback,
        }
    }

    /// Store a token, replacing whatever was there.
    ///
    /// Returns the computed absolute expiry, if any.
    pub async fn set_token(
        &self,
        value: impl Into<String>,
        expires_in_seconds: Option<u64>,
        origin: TokenOrigin,
    ) -> Option<DateTime<Utc>> {
        self.set_token_at(value, expires_in_seconds, origin, Utc::now())
            .await
    }

    /// [`Session::set_token`] with an explicit clock.
    pub async fn set_token_at(
        &self,
        value: impl Into<String>,
        expires_in_seconds: Option<u64>,
        origin: TokenOrigin,
        now: DateTime<Utc>,
    ) -> Option<DateTime<Utc>> {
        // An expiry too large to represent is treated as no expiry.
        let expires_at = expires_in_seconds
            .and_then(|secs| i64::try_from(secs).ok())
            .and_then(TimeDelta::try_seconds)
            .and_then(|delta| now.checked_add_signed(delta));

        *self.stored.write().await = Some(StoredToken {
            value: value.into(),
            expires_at,
            origin,
        });
        debug!(?origin, ?expires_at, "Stored access token");
        expires_at
    }

    /// The token outbound calls should use, if any.
    pub async fn active_token(&self) -> Option<String> {
        self.active_token_at(Utc::now()).await
    }

    /// [`Session::active_token`] with an explicit clock.
    pub async fn active_token_at(&self, now: DateTime<Utc>) -> Option<String> {
        self.resolve_at(now).await.map(|t| t.value)
    }

    /// Report whether a token is active, where it came from, and how long it has left.
    pub async fn status(&self) -> AuthStatus {
        self.status_at(Utc::now()).await
    }

    /// [`Session::status`] with an explicit clock.
    pub async fn status_at(&self, now: DateTime<Utc>) -> AuthStatus {
        match self.resolve_at(now).await {
            Some(token) => AuthStatus {
                authenticated: true,
                token_source: token.source,
                expires_at: token.expires_at,
                expires_in_seconds: token.expires_at.map(|at| (at - now).num_seconds()),
            },
            None => AuthStatus {
                authenticated: false,
                token_source: TokenSource::None,
                expires_at: None,
                expires_in_seconds: None,
            },
        }
    }

    /// Whether a fallback token was configured.
    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    async fn resolve_at(&self, now: DateTime<Utc>) -> Option<ResolvedToken> {
        {
            let stored = self.stored.read().await;
            match stored.as_ref() {
                Some(token) if token.is_usable_at(now) => {
                    return Some(ResolvedToken {
                        value: token.value.clone(),
                        source: token.origin.into(),
                        expires_at: token.expires_at,
                    });
                }
                Some(_) => {}
                None => return self.fallback_token(),
            }
        }

        // Re-check under the write lock; a concurrent write may have replaced it.
        let mut stored = self.stored.write().await;
        if let Some(token) = stored.as_ref() {
            if token.is_usable_at(now) {
                return Some(ResolvedToken {
                    value: token.value.clone(),
                    source: token.origin.into(),
                    expires_at: token.expires_at,
                });
            }
            debug!("Stored access token is expiring, clearing it");
            *stored = None;
        }
        self.fallback_token()
    }

    fn fallback_token(&self) -> Option<ResolvedToken> {
        self.fallback.as_ref().map(|value| ResolvedToken {
            value: value.clone(),
            source: TokenSource::Environment,
            expires_at: None,
        })
    }
}
