//! Box content API access: the bearer-authenticated client and the typed
//! payloads for the endpoints the tools use.

mod client;
pub mod types;

pub use client::BoxClient;
pub use types::{
    ExtractRequest, ExtractStructuredRequest, FieldDefinition, FieldOption, FileInfo, FolderRef,
    TokenResponse,
};
