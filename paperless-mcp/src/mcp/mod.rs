//! Model Context Protocol (MCP) server support
//!
//! This module hosts the Paperless tool operations behind an rmcp
//! `ServerHandler`: a registry of tools, typed request structs, and the
//! handlers carrying the shared config/client/cache state.

// Module declarations
pub mod server;
pub mod tool_handlers;
pub mod tool_registry;
pub mod tools;
pub mod types;

// Re-export commonly used items from submodules
pub use server::PaperlessMcpServer;
pub use tool_handlers::ToolHandlers;
pub use tool_registry::{BaseToolImpl, McpTool, ToolContext, ToolRegistry};
