//! MCP tool implementations for the Paperless API
//!
//! Thin adapters between the MCP protocol and the tool handlers: each
//! tool parses its argument bag into a typed request and returns the
//! handler's payload (success or typed error) as a JSON tool result.

pub mod documents;
pub mod lookups;

use crate::mcp::tool_registry::ToolRegistry;

/// Register the document tools (healthcheck, search, get, upload, update).
pub fn register_document_tools(registry: &mut ToolRegistry) {
    registry.register(documents::HealthcheckTool);
    registry.register(documents::SearchDocumentsTool);
    registry.register(documents::GetDocumentTool);
    registry.register(documents::UploadDocumentTool);
    registry.register(documents::UpdateDocumentTool);
}

/// Register the lookup tools (create, list).
pub fn register_lookup_tools(registry: &mut ToolRegistry) {
    registry.register(lookups::CreateLookupTool);
    registry.register(lookups::ListLookupsTool);
}
