//! Credentials for Box JWT (server-to-server) authentication.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which kind of Box identity the assertion is issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectType {
    User,
    Enterprise,
}

impl SubjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Enterprise => "enterprise",
        }
    }
}

impl std::str::FromStr for SubjectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Self::User),
            "enterprise" => Ok(Self::Enterprise),
            other => Err(format!(
                "unknown subject type `{}` (expected `user` or `enterprise`)",
                other
            )),
        }
    }
}

/// Everything needed to mint one JWT assertion and exchange it for a token.
///
/// Supplied per `authenticate` call and never stored.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    /// RSA private key in PEM form (PKCS#1 or PKCS#8)
    pub private_key: String,
    /// Box's id for the uploaded public key, sent as the JWT `kid`
    pub public_key_id: String,
    pub subject_type: SubjectType,
    /// User id or enterprise id, depending on `subject_type`
    pub subject_id: String,
}

impl Credentials {
    /// The private key with escaped `\n` sequences turned into real newlines.
    ///
    /// Keys pasted through JSON config files often arrive on a single line.
    pub fn private_key_pem(&self) -> String {
        self.private_key.trim().replace("\\n", "\n")
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("private_key", &"<redacted>")
            .field("public_key_id", &self.public_key_id)
            .field("subject_type", &self.subject_type)
            .field("subject_id", &self.subject_id)
            .finish()
    }
}
