//! MCP server implementation using rmcp.
//!
//! Exposes the Box tool registry to an MCP host over stdio.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError,
    handler::server::ServerHandler,
    model::*,
    service::{NotificationContext, RequestContext, RoleServer},
};

use crate::tools::{ToolContext, ToolRegistry};

const INSTRUCTIONS: &str = "Box AI metadata extraction. Authenticate first with `authenticate` \
     (JWT server auth) or `set-access-token`, then use `extract-metadata`, \
     `extract-structured-metadata` and `get-file-info` on Box file IDs. \
     `get-auth-status` shows whether a token is active.";

/// MCP server that handles protocol requests and delegates to tool handlers.
#[derive(Clone)]
pub struct McpServer {
    tool_registry: Arc<ToolRegistry>,
    context: ToolContext,
}

impl McpServer {
    /// Create a new MCP server with the given tool registry and handler context.
    pub fn new(tool_registry: Arc<ToolRegistry>, context: ToolContext) -> Self {
        Self {
            tool_registry,
            context,
        }
    }

    /// Get the tool registry.
    pub fn tool_registry(&self) -> &Arc<ToolRegistry> {
        &self.tool_registry
    }

    /// Get the context handed to every tool call.
    pub fn context(&self) -> &ToolContext {
        &self.context
    }

    fn capabilities() -> ServerCapabilities {
        ServerCapabilities::builder().enable_tools().build()
    }
}

impl ServerHandler for McpServer {
    fn ping(
        &self,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<(), McpError>> + Send + '_ {
        std::future::ready(Ok(()))
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<ListToolsResult, McpError>> + Send + '_ {
        let result = ListToolsResult {
            tools: self.tool_registry.list_tools(),
            next_cursor: None,
            ..Default::default()
        };
        std::future::ready(Ok(result))
    }

    fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<CallToolResult, McpError>> + Send + '_ {
        let tool_name = request.name.to_string();
        let args = request.arguments.unwrap_or_default();
        let registry = self.tool_registry.clone();
        let ctx = self.context.clone();

        async move {
            tracing::debug!(tool = %tool_name, "Tool call");
            registry
                .call_tool(&tool_name, args, &ctx)
                .await
                .map_err(|e| {
                    tracing::warn!(tool = %tool_name, error = %e, "Tool call rejected");
                    e.to_mcp_error()
                })
        }
    }

    fn on_initialized(
        &self,
        _context: NotificationContext<RoleServer>,
    ) -> impl Future<Output = ()> + Send + '_ {
        tracing::info!("MCP client initialized");
        std::future::ready(())
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: Self::capabilities(),
            server_info: Implementation::from_build_env(),
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }
}
