// Core modules
pub mod auth;
pub mod box_api;
mod config;
mod error;
mod session;

// MCP surface
pub mod server;
pub mod tools;

// Re-export key types and functions
pub use auth::{Credentials, SubjectType, build_assertion};
pub use box_api::BoxClient;
pub use config::{BoxConfig, DEFAULT_API_BASE, DEFAULT_TOKEN_URL, DEVELOPER_TOKEN_ENV};
pub use error::{BoxError, BoxResult};
pub use session::{AuthStatus, EXPIRY_MARGIN_SECONDS, Session, TokenOrigin, TokenSource};

pub use server::McpServer;
pub use tools::{ToolContext, ToolHandler, ToolRegistry};

use std::sync::Arc;

/// Convenience function to create a fully configured MCP server.
///
/// This creates the session and Box client, registers the six Box tools, and
/// returns a McpServer that implements rmcp's ServerHandler.
pub fn create_server(config: BoxConfig) -> Arc<McpServer> {
    let session = Arc::new(Session::new(config.developer_token.clone()));
    let client = BoxClient::new(config, session);

    let tool_registry = Arc::new(tools::default_registry());
    let server = McpServer::new(tool_registry, ToolContext::new(client));

    Arc::new(server)
}
