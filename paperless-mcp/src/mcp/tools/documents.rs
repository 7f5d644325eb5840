//! Document tools: healthcheck, search, get, upload, update

use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;
use serde_json::json;

use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::{
    GetDocumentRequest, SearchDocumentsRequest, UpdateDocumentRequest, UploadDocumentRequest,
};

/// Liveness probe tool
pub struct HealthcheckTool;

#[async_trait]
impl McpTool for HealthcheckTool {
    fn name(&self) -> &'static str {
        "healthcheck"
    }

    fn description(&self) -> &'static str {
        "Return service status for basic connectivity checks. \
         Returns the string \"ok\" on success without touching the Paperless API."
    }

    fn schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {},
            "required": []
        })
    }

    async fn execute(
        &self,
        _arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        Ok(BaseToolImpl::handler_response(Ok(
            context.tool_handlers.healthcheck()
        )))
    }
}

/// Tool for searching documents
pub struct SearchDocumentsTool;

#[async_trait]
impl McpTool for SearchDocumentsTool {
    fn name(&self) -> &'static str {
        "search_documents"
    }

    fn description(&self) -> &'static str {
        "Search Paperless documents by text query and optional filters. \
         Returns count, next, previous and a page of compact document summaries."
    }

    fn schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Full-text search string. Leave empty to list recent documents."
                },
                "page": {
                    "type": "integer",
                    "description": "1-based page index"
                },
                "page_size": {
                    "type": "integer",
                    "description": "Number of items per page (capped at the configured maximum)"
                },
                "tag_id": {
                    "type": "integer",
                    "description": "Filter by a specific tag ID"
                },
                "correspondent_id": {
                    "type": "integer",
                    "description": "Filter by correspondent ID"
                },
                "document_type_id": {
                    "type": "integer",
                    "description": "Filter by document type ID"
                },
                "created_from": {
                    "type": "string",
                    "description": "Lower bound date (YYYY-MM-DD) for created date"
                },
                "created_to": {
                    "type": "string",
                    "description": "Upper bound date (YYYY-MM-DD) for created date"
                },
                "custom_filters": {
                    "type": "object",
                    "description": "Raw Paperless filter keys/values, e.g. {\"storage_path__id\": 2}"
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
        let request: SearchDocumentsRequest = BaseToolImpl::parse_arguments(arguments)?;
        Ok(BaseToolImpl::handler_response(
            context.tool_handlers.search_documents(request).await,
        ))
    }
}

/// Tool for fetching a single document
pub struct GetDocumentTool;

#[async_trait]
impl McpTool for GetDocumentTool {
    fn name(&self) -> &'static str {
        "get_document"
    }

    fn description(&self) -> &'static str {
        "Fetch a single Paperless document by its numeric ID, returning the raw record."
    }

    fn schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "document_id": {
                    "type": "integer",
                    "description": "The numeric Paperless document ID"
                }
            },
            "required": ["document_id"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: GetDocumentRequest = BaseToolImpl::parse_arguments(arguments)?;
        Ok(BaseToolImpl::handler_response(
            context.tool_handlers.get_document(request).await,
        ))
    }
}

/// Tool for uploading a document
pub struct UploadDocumentTool;

#[async_trait]
impl McpTool for UploadDocumentTool {
    fn name(&self) -> &'static str {
        "upload_document"
    }

    fn description(&self) -> &'static str {
        "Upload a document file to Paperless with optional metadata fields. \
         Lists are sent as repeated form fields; objects are JSON-encoded. \
         The response usually carries a consumption task ID."
    }

    fn schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "file_path": {
                    "type": "string",
                    "description": "Path to the file on disk"
                },
                "metadata": {
                    "type": "object",
                    "description": "Paperless fields such as title, tags, correspondent, document_type, created"
                },
                "filename": {
                    "type": "string",
                    "description": "Optional filename override for the uploaded file"
                }
            },
            "required": ["file_path"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: UploadDocumentRequest = BaseToolImpl::parse_arguments(arguments)?;
        Ok(BaseToolImpl::handler_response(
            context.tool_handlers.upload_document(request).await,
        ))
    }
}

/// Tool for updating a document
pub struct UpdateDocumentTool;

#[async_trait]
impl McpTool for UpdateDocumentTool {
    fn name(&self) -> &'static str {
        "update_document"
    }

    fn description(&self) -> &'static str {
        "Update fields of a Paperless document by ID and return the updated record."
    }

    fn schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "document_id": {
                    "type": "integer",
                    "description": "The numeric Paperless document ID"
                },
                "updates": {
                    "type": "object",
                    "description": "Fields to update, e.g. title, tags, correspondent, storage_path"
                }
            },
            "required": ["document_id", "updates"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: UpdateDocumentRequest = BaseToolImpl::parse_arguments(arguments)?;
        Ok(BaseToolImpl::handler_response(
            context.tool_handlers.update_document(request).await,
        ))
    }
}
