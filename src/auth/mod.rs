//! Box JWT authentication.
//!
//! - [`Credentials`]: app + subject identity supplied per `authenticate` call
//! - [`build_assertion`]: signs the short-lived RS256 assertion that the
//!   token endpoint exchanges for an access token
//!
//! The exchange itself lives in [`crate::box_api::BoxClient::exchange_assertion`].

mod assertion;
mod credentials;

pub use assertion::{
    ASSERTION_LIFETIME_SECONDS, AssertionClaims, build_assertion, build_assertion_at,
};
pub use credentials::{Credentials, SubjectType};
