//! MCP server implementation for the Paperless tools

use rmcp::model::*;
use rmcp::service::RequestContext;
use rmcp::{Error as McpError, RoleServer, ServerHandler};
use std::sync::Arc;

use crate::config::PaperlessConfig;
use crate::error::Result;
use crate::mcp::tool_handlers::ToolHandlers;
use crate::mcp::tool_registry::{ToolContext, ToolRegistry};
use crate::mcp::tools::{register_document_tools, register_lookup_tools};

const SERVER_INSTRUCTIONS: &str = "Tools for a Paperless-ngx document archive. \
    Use search_documents/get_document to find and read documents, \
    upload_document and update_document to add and change them, and \
    list_lookups/create_lookup to inspect and extend the metadata \
    vocabulary (tags, document types, correspondents, storage paths, \
    custom fields).";

/// MCP server exposing the Paperless tool operations
#[derive(Clone)]
pub struct PaperlessMcpServer {
    tool_registry: Arc<ToolRegistry>,
    /// Tool context containing shared state for tool execution
    pub tool_context: Arc<ToolContext>,
}

impl PaperlessMcpServer {
    /// Create a server from resolved configuration.
    ///
    /// Fails when the HTTP client cannot be constructed (for example an
    /// unreadable CA bundle), so a misconfigured process dies before the
    /// transport binds.
    pub fn new(config: PaperlessConfig) -> Result<Self> {
        let tool_handlers = Arc::new(ToolHandlers::new(config)?);

        let mut tool_registry = ToolRegistry::new();
        register_document_tools(&mut tool_registry);
        register_lookup_tools(&mut tool_registry);

        Ok(Self {
            tool_registry: Arc::new(tool_registry),
            tool_context: Arc::new(ToolContext::new(tool_handlers)),
        })
    }

    fn capabilities() -> ServerCapabilities {
        ServerCapabilities {
            prompts: None,
            tools: Some(ToolsCapability {
                list_changed: Some(false),
            }),
            resources: None,
            logging: None,
            completions: None,
            experimental: None,
        }
    }
}

impl ServerHandler for PaperlessMcpServer {
    async fn initialize(
        &self,
        request: InitializeRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<InitializeResult, McpError> {
        tracing::info!(
            "MCP client connecting: {} v{}",
            request.client_info.name,
            request.client_info.version
        );

        Ok(InitializeResult {
            protocol_version: ProtocolVersion::default(),
            capabilities: Self::capabilities(),
            instructions: Some(SERVER_INSTRUCTIONS.into()),
            server_info: Implementation {
                name: "paperless-mcp".into(),
                version: crate::VERSION.into(),
            },
        })
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tool_registry.list_tools(),
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        if let Some(tool) = self.tool_registry.get_tool(&request.name) {
            tool.execute(request.arguments.unwrap_or_default(), &self.tool_context)
                .await
        } else {
            Err(McpError::invalid_request(
                format!("Unknown tool: {}", request.name),
                None,
            ))
        }
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::default(),
            capabilities: Self::capabilities(),
            server_info: Implementation {
                name: "paperless-mcp".into(),
                version: crate::VERSION.into(),
            },
            instructions: Some(SERVER_INSTRUCTIONS.into()),
        }
    }
}
