//! Tool registry for MCP operations
//!
//! Registry pattern for managing the Paperless tools, so dispatch stays a
//! map lookup instead of a growing match statement.

use rmcp::model::{Annotated, CallToolResult, RawContent, RawTextContent, Tool};
use rmcp::Error as McpError;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::ToolError;
use crate::mcp::tool_handlers::ToolHandlers;

/// Context shared by all tools during execution
#[derive(Clone)]
pub struct ToolContext {
    /// The tool handlers instance containing the business logic
    pub tool_handlers: Arc<ToolHandlers>,
}

impl ToolContext {
    /// Create a new tool context
    pub fn new(tool_handlers: Arc<ToolHandlers>) -> Self {
        Self { tool_handlers }
    }
}

/// Trait defining the interface for all MCP tools
#[async_trait::async_trait]
pub trait McpTool: Send + Sync {
    /// Get the tool's name
    fn name(&self) -> &'static str;

    /// Get the tool's description
    fn description(&self) -> &'static str;

    /// Get the tool's JSON schema for arguments
    fn schema(&self) -> serde_json::Value;

    /// Execute the tool with the given arguments and context
    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError>;
}

/// Registry for managing MCP tools
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn McpTool>>,
}

impl ToolRegistry {
    /// Create a new empty tool registry
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool in the registry
    pub fn register<T: McpTool + 'static>(&mut self, tool: T) {
        let name = tool.name().to_string();
        self.tools.insert(name, Box::new(tool));
    }

    /// Get a tool by name
    pub fn get_tool(&self, name: &str) -> Option<&dyn McpTool> {
        self.tools.get(name).map(|tool| tool.as_ref())
    }

    /// List all registered tool names
    pub fn list_tool_names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    /// Get all registered tools as Tool objects for MCP list_tools response
    pub fn list_tools(&self) -> Vec<Tool> {
        self.tools
            .values()
            .map(|tool| {
                let schema = tool.schema();
                let schema_map = if let serde_json::Value::Object(map) = schema {
                    map
                } else {
                    serde_json::Map::new()
                };

                Tool {
                    name: tool.name().into(),
                    description: Some(tool.description().into()),
                    input_schema: std::sync::Arc::new(schema_map),
                    annotations: None,
                }
            })
            .collect()
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Base implementation providing common utility methods for MCP tools
pub struct BaseToolImpl;

impl BaseToolImpl {
    /// Parse tool arguments from a JSON map into a typed struct
    pub fn parse_arguments<T: serde::de::DeserializeOwned>(
        arguments: serde_json::Map<String, serde_json::Value>,
    ) -> std::result::Result<T, McpError> {
        serde_json::from_value(serde_json::Value::Object(arguments))
            .map_err(|e| McpError::invalid_request(format!("Invalid arguments: {e}"), None))
    }

    /// Wrap a handler outcome as a tool result.
    ///
    /// Success payloads and error payloads are both returned to the
    /// caller as JSON text; only `is_error` distinguishes them. Errors
    /// never escape to the transport as protocol failures.
    pub fn handler_response(
        result: std::result::Result<Value, ToolError>,
    ) -> CallToolResult {
        match result {
            Ok(value) => Self::json_response(&value, false),
            Err(error) => Self::json_response(&error.payload(), true),
        }
    }

    fn json_response(value: &Value, is_error: bool) -> CallToolResult {
        CallToolResult {
            content: vec![Annotated::new(
                RawContent::Text(RawTextContent {
                    text: value.to_string(),
                }),
                None,
            )],
            is_error: Some(is_error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;
    use serde_json::json;

    /// Mock tool for testing
    struct MockTool {
        name: &'static str,
        description: &'static str,
    }

    #[async_trait::async_trait]
    impl McpTool for MockTool {
        fn name(&self) -> &'static str {
            self.name
        }

        fn description(&self) -> &'static str {
            self.description
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
            _context: &ToolContext,
        ) -> std::result::Result<CallToolResult, McpError> {
            Ok(BaseToolImpl::handler_response(Ok(json!("ok"))))
        }
    }

    #[test]
    fn test_tool_registry_creation() {
        let registry = ToolRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_tool_registration_and_lookup() {
        let mut registry = ToolRegistry::new();
        registry.register(MockTool {
            name: "test_tool",
            description: "A test tool",
        });

        assert_eq!(registry.len(), 1);
        let tool = registry.get_tool("test_tool").unwrap();
        assert_eq!(tool.name(), "test_tool");
        assert_eq!(tool.description(), "A test tool");
        assert!(registry.get_tool("nonexistent").is_none());
    }

    #[test]
    fn test_list_tools_carries_schemas() {
        let mut registry = ToolRegistry::new();
        registry.register(MockTool {
            name: "tool1",
            description: "First tool",
        });
        registry.register(MockTool {
            name: "tool2",
            description: "Second tool",
        });

        let tools = registry.list_tools();
        assert_eq!(tools.len(), 2);
        assert!(tools.iter().all(|t| t.input_schema.contains_key("type")));

        let names = registry.list_tool_names();
        assert!(names.contains(&"tool1".to_string()));
        assert!(names.contains(&"tool2".to_string()));
    }

    #[test]
    fn test_parse_arguments() {
        use serde::Deserialize;

        #[derive(Deserialize, PartialEq, Debug)]
        struct TestArgs {
            name: String,
            count: Option<i32>,
        }

        let mut args = serde_json::Map::new();
        args.insert("name".to_string(), json!("test"));
        args.insert("count".to_string(), json!(42));

        let parsed: TestArgs = BaseToolImpl::parse_arguments(args).unwrap();
        assert_eq!(parsed.name, "test");
        assert_eq!(parsed.count, Some(42));

        let result: std::result::Result<TestArgs, McpError> =
            BaseToolImpl::parse_arguments(serde_json::Map::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_handler_response_success() {
        let response = BaseToolImpl::handler_response(Ok(json!({"count": 1})));
        assert_eq!(response.is_error, Some(false));
        if let RawContent::Text(text) = &response.content[0].raw {
            let value: Value = serde_json::from_str(&text.text).unwrap();
            assert_eq!(value["count"], 1);
        } else {
            panic!("Expected text content");
        }
    }

    #[test]
    fn test_handler_response_error_payload() {
        let response = BaseToolImpl::handler_response(Err(ToolError::invalid_request(
            "document_id must be positive.",
        )));
        assert_eq!(response.is_error, Some(true));
        if let RawContent::Text(text) = &response.content[0].raw {
            let value: Value = serde_json::from_str(&text.text).unwrap();
            assert_eq!(value["error"], "invalid_request");
            assert_eq!(value["message"], "document_id must be positive.");
        } else {
            panic!("Expected text content");
        }
    }
}
