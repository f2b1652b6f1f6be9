//! Tool handler registry for managing MCP tool implementations.
//!
//! This module provides a simple way to register and invoke tool handlers,
//! making it easy to add new tools without modifying the core `ServerHandler`
//! implementation.

mod registry;

pub mod envelope;

pub use registry::{ToolContext, ToolError, ToolFuture, ToolHandler, ToolRegistry};

// Tool handler implementations
mod authenticate;
mod extract_metadata;
mod extract_structured_metadata;
mod get_auth_status;
mod get_file_info;
mod set_access_token;

#[cfg(test)]
mod integration_tests;

pub use authenticate::{AuthenticateHandler, AuthenticateOutput, authenticate};
pub use extract_metadata::ExtractMetadataHandler;
pub use extract_structured_metadata::ExtractStructuredMetadataHandler;
pub use get_auth_status::GetAuthStatusHandler;
pub use get_file_info::GetFileInfoHandler;
pub use set_access_token::SetAccessTokenHandler;

/// Registry holding all six Box tools.
pub fn default_registry() -> ToolRegistry {
    ToolRegistry::new()
        .register_handler(AuthenticateHandler)
        .register_handler(SetAccessTokenHandler)
        .register_handler(GetAuthStatusHandler)
        .register_handler(ExtractMetadataHandler)
        .register_handler(ExtractStructuredMetadataHandler)
        .register_handler(GetFileInfoHandler)
}
