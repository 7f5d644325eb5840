//! Lookup tools: create and list metadata categories

use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;
use serde_json::json;

use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::{CreateLookupRequest, ListLookupsRequest};

/// Tool for creating a lookup item
pub struct CreateLookupTool;

#[async_trait]
impl McpTool for CreateLookupTool {
    fn name(&self) -> &'static str {
        "create_lookup"
    }

    fn description(&self) -> &'static str {
        "Create a lookup item such as a tag, document type, correspondent, \
         storage path or custom field. Singular aliases are accepted for the \
         type name. When the category supports matching and no algorithm is \
         supplied, auto matching is applied by default."
    }

    fn schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "lookup_type": {
                    "type": "string",
                    "description": "One of: tags, document_types, correspondents, storage_paths, custom_fields (singular aliases accepted)"
                },
                "data": {
                    "type": "object",
                    "description": "Fields for the Paperless object, e.g. {\"name\": \"Invoices\"}"
                },
                "parent_id": {
                    "type": "integer",
                    "description": "Optional parent tag ID (tags only)"
                },
                "match": {
                    "type": "string",
                    "description": "Optional match string for automatic tagging"
                },
                "matching_algorithm": {
                    "description": "Match algorithm as an integer code or label: none, any, all, exact, regex, fuzzy, auto"
                },
                "auto_match": {
                    "type": "boolean",
                    "description": "When true (default), default the matching algorithm to auto if not provided"
                },
                "permissions": {
                    "type": "array",
                    "description": "Optional list of user IDs to grant access"
                }
            },
            "required": ["lookup_type", "data"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: CreateLookupRequest = BaseToolImpl::parse_arguments(arguments)?;
        Ok(BaseToolImpl::handler_response(
            context.tool_handlers.create_lookup(request).await,
        ))
    }
}

/// Tool for listing lookup categories
pub struct ListLookupsTool;

#[async_trait]
impl McpTool for ListLookupsTool {
    fn name(&self) -> &'static str {
        "list_lookups"
    }

    fn description(&self) -> &'static str {
        "Return tags, document types, correspondents, storage paths and \
         custom fields, served from an in-memory cache when fresh. The \
         response carries each selected list, a counts map, and a per-category \
         errors map when some categories fail."
    }

    fn schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "refresh": {
                    "type": "boolean",
                    "description": "Bypass the cache and fetch from Paperless now"
                },
                "include": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "Limit which lookups to return; allowed values: tags, document_types, correspondents, storage_paths, custom_fields"
                },
                "fields": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "Keys to keep in each returned item; omit for full objects"
                }
            },
            "required": []
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: ListLookupsRequest = BaseToolImpl::parse_arguments(arguments)?;
        Ok(BaseToolImpl::handler_response(
            context.tool_handlers.list_lookups(request).await,
        ))
    }
}
