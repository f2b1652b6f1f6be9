//! JWT-bearer assertion signing.
//!
//! Box's server-to-server flow expects an RS256-signed JWT whose `kid` names
//! the uploaded public key and whose claims identify the app and subject.
//! The assertion is valid for [`ASSERTION_LIFETIME_SECONDS`]; the exchange
//! must happen inside that window, which is only checked by Box.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::credentials::{Credentials, SubjectType};
use crate::error::{BoxError, BoxResult};

/// Lifetime of a signed assertion.
pub const ASSERTION_LIFETIME_SECONDS: i64 = 60;

/// Claims carried by the assertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssertionClaims {
    pub iss: String,
    pub sub: String,
    pub box_sub_type: SubjectType,
    pub aud: String,
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

impl AssertionClaims {
    fn new(credentials: &Credentials, audience: &str, now: DateTime<Utc>) -> Self {
        let iat = now.timestamp();
        Self {
            iss: credentials.client_id.clone(),
            sub: credentials.subject_id.clone(),
            box_sub_type: credentials.subject_type,
            aud: audience.to_string(),
            // 16 random bytes, hex encoded
            jti: Uuid::new_v4().simple().to_string(),
            iat,
            exp: iat + ASSERTION_LIFETIME_SECONDS,
        }
    }
}

/// Sign an assertion for `credentials`, addressed to the token endpoint `audience`.
pub fn build_assertion(credentials: &Credentials, audience: &str) -> BoxResult<String> {
    build_assertion_at(credentials, audience, Utc::now())
}

/// [`build_assertion`] with an explicit clock.
pub fn build_assertion_at(
    credentials: &Credentials,
    audience: &str,
    now: DateTime<Utc>,
) -> BoxResult<String> {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(credentials.public_key_id.clone());

    let key = EncodingKey::from_rsa_pem(credentials.private_key_pem().as_bytes())
        .map_err(|e| BoxError::InvalidKey(format!("could not parse RSA PEM: {}", e)))?;

    let claims = AssertionClaims::new(credentials, audience, now);
    Ok(encode(&header, &claims, &key)?)
}
