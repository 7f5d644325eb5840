use clap::{Parser, Subcommand};
use serde_json::{Map, Value};

/// Parse a JSON-object flag value into a key/value map.
pub fn parse_json_object(raw: &str) -> Result<Map<String, Value>, String> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err("expected a JSON object".to_string()),
        Err(e) => Err(format!("invalid JSON: {e}")),
    }
}

/// Parse a JSON-array flag value.
pub fn parse_json_array(raw: &str) -> Result<Value, String> {
    match serde_json::from_str::<Value>(raw) {
        Ok(value @ Value::Array(_)) => Ok(value),
        Ok(_) => Err("expected a JSON array".to_string()),
        Err(e) => Err(format!("invalid JSON: {e}")),
    }
}

#[derive(Parser, Debug)]
#[command(name = "paperless-mcp")]
#[command(version)]
#[command(about = "An MCP server for the Paperless-ngx document management API")]
#[command(long_about = "
paperless-mcp exposes a Paperless-ngx instance through MCP (Model
Context Protocol) tools: document search, fetch, upload and update,
plus listing and creation of metadata lookups (tags, document types,
correspondents, storage paths, custom fields).

Configuration comes from the environment: PAPERLESS_URL,
PAPERLESS_TOKEN (required), PAPERLESS_TIMEOUT_SECONDS,
PAPERLESS_VERIFY_SSL, PAPERLESS_CA_BUNDLE and
MCP_LOOKUP_CACHE_TTL_SECONDS.

Example usage:
  paperless-mcp serve          # Run as MCP server over stdio
  paperless-mcp healthcheck    # Liveness probe
  paperless-mcp search --query invoice
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run as MCP server (default when invoked via stdio)
    #[command(long_about = "
Runs paperless-mcp as an MCP server over stdio (e.g., for Claude
Code). Configuration is resolved once at startup; a missing or invalid
setting fails fast with a config_error before the transport binds.

Example:
  paperless-mcp serve
  # Or configure in your MCP client's settings
")]
    Serve,
    /// Print "ok" without touching the Paperless API
    Healthcheck,
    /// Search documents by text query and optional filters
    Search {
        /// Full-text search string; empty lists recent documents
        #[arg(long, default_value = "")]
        query: String,
        /// 1-based page index
        #[arg(long, default_value_t = 1)]
        page: i64,
        /// Items per page (capped at the configured maximum)
        #[arg(long, default_value_t = 0)]
        page_size: i64,
        /// Filter by tag ID
        #[arg(long)]
        tag_id: Option<i64>,
        /// Filter by correspondent ID
        #[arg(long)]
        correspondent_id: Option<i64>,
        /// Filter by document type ID
        #[arg(long)]
        document_type_id: Option<i64>,
        /// Lower bound date (YYYY-MM-DD) for created date
        #[arg(long)]
        created_from: Option<String>,
        /// Upper bound date (YYYY-MM-DD) for created date
        #[arg(long)]
        created_to: Option<String>,
        /// Raw Paperless filters as a JSON object
        #[arg(long, value_parser = parse_json_object)]
        custom_filters: Option<Map<String, Value>>,
    },
    /// Fetch a single document by ID
    Get {
        /// Numeric Paperless document ID
        document_id: i64,
    },
    /// Upload a document file with optional metadata
    Upload {
        /// Path to the file on disk
        file_path: String,
        /// Paperless fields as a JSON object
        #[arg(long, value_parser = parse_json_object)]
        metadata: Option<Map<String, Value>>,
        /// Filename override for the uploaded file
        #[arg(long)]
        filename: Option<String>,
    },
    /// Update fields of a document by ID
    Update {
        /// Numeric Paperless document ID
        document_id: i64,
        /// Fields to update as a JSON object
        #[arg(long, value_parser = parse_json_object)]
        updates: Map<String, Value>,
    },
    /// Create a lookup item (tag, document type, correspondent, ...)
    CreateLookup {
        /// Category name; singular aliases accepted
        lookup_type: String,
        /// Fields for the new object as a JSON object
        #[arg(long, value_parser = parse_json_object)]
        data: Map<String, Value>,
        /// Parent tag ID (tags only)
        #[arg(long)]
        parent_id: Option<i64>,
        /// Match string for automatic tagging
        #[arg(long = "match")]
        match_value: Option<String>,
        /// Match algorithm as an integer code or label
        #[arg(long)]
        matching_algorithm: Option<String>,
        /// Do not default the matching algorithm to auto
        #[arg(long)]
        no_auto_match: bool,
        /// User IDs to grant access, as a JSON array
        #[arg(long, value_parser = parse_json_array)]
        permissions: Option<Value>,
    },
    /// List lookup categories, served from cache when fresh
    ListLookups {
        /// Bypass the cache and fetch from Paperless now
        #[arg(long)]
        refresh: bool,
        /// Comma-separated category names to include
        #[arg(long, value_delimiter = ',')]
        include: Option<Vec<String>>,
        /// Comma-separated keys to keep in each returned item
        #[arg(long, value_delimiter = ',')]
        fields: Option<Vec<String>>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    #[allow(dead_code)]
    pub fn try_parse_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(args)
    }
}
