//! # Paperless MCP
//!
//! An MCP (Model Context Protocol) server library for the Paperless-ngx
//! document management API.
//!
//! ## Features
//!
//! - **Document tools**: search, fetch, upload and update documents
//! - **Lookup tools**: list and create tags, document types,
//!   correspondents, storage paths and custom fields
//! - **Lookup cache**: TTL-based in-memory cache over the paginated
//!   lookup listings
//! - **Typed errors**: every failure is shaped into a tagged payload
//!   callers can match on
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use paperless_mcp::config::PaperlessConfig;
//! use paperless_mcp::mcp::PaperlessMcpServer;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Resolve settings from PAPERLESS_* environment variables once,
//! // then hand them to the server.
//! let config = PaperlessConfig::from_env()?;
//! let server = PaperlessMcpServer::new(config)?;
//! # let _ = server;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

/// HTTP client for the Paperless-ngx REST API
pub mod client;

/// Configuration resolved from the environment
pub mod config;

/// Error types used throughout the library
pub mod error;

/// Lookup categories and the in-memory lookup cache
pub mod lookups;

/// Model Context Protocol (MCP) server support
pub mod mcp;

/// Request normalization helpers
pub mod normalize;

// Re-export core types
pub use client::PaperlessClient;
pub use config::{PaperlessConfig, TlsVerify};
pub use error::{Result, ToolError};
pub use lookups::{LookupCache, LookupCategory, RemoteItem};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
