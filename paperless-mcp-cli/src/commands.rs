//! Direct CLI execution of the tool operations
//!
//! Subcommands map onto the same request types the MCP tools parse, so
//! the CLI and the server share one code path through the handlers. The
//! operation's JSON payload (success or error) is printed to stdout.

use serde_json::{json, Value};

use paperless_mcp::config::PaperlessConfig;
use paperless_mcp::mcp::types::{
    CreateLookupRequest, GetDocumentRequest, ListLookupsRequest, SearchDocumentsRequest,
    UpdateDocumentRequest, UploadDocumentRequest,
};
use paperless_mcp::mcp::ToolHandlers;
use paperless_mcp::ToolError;

use crate::cli::Commands;
use crate::exit_codes::{EXIT_ERROR, EXIT_SUCCESS};

/// Run a non-serve subcommand and print its payload.
pub async fn run_tool_command(command: Commands) -> i32 {
    // Healthcheck needs neither configuration nor network.
    if matches!(command, Commands::Healthcheck) {
        println!("ok");
        return EXIT_SUCCESS;
    }

    match execute(command).await {
        Ok(value) => {
            println!("{}", pretty(&value));
            EXIT_SUCCESS
        }
        Err(error) => {
            tracing::error!("{}", error);
            println!("{}", pretty(&error.payload()));
            EXIT_ERROR
        }
    }
}

async fn execute(command: Commands) -> Result<Value, ToolError> {
    let config = PaperlessConfig::from_env()?;
    let handlers = ToolHandlers::new(config)?;

    match command {
        Commands::Search {
            query,
            page,
            page_size,
            tag_id,
            correspondent_id,
            document_type_id,
            created_from,
            created_to,
            custom_filters,
        } => {
            handlers
                .search_documents(SearchDocumentsRequest {
                    query,
                    page,
                    page_size,
                    tag_id,
                    correspondent_id,
                    document_type_id,
                    created_from,
                    created_to,
                    custom_filters,
                })
                .await
        }
        Commands::Get { document_id } => {
            handlers.get_document(GetDocumentRequest { document_id }).await
        }
        Commands::Upload {
            file_path,
            metadata,
            filename,
        } => {
            handlers
                .upload_document(UploadDocumentRequest {
                    file_path,
                    metadata,
                    filename,
                })
                .await
        }
        Commands::Update {
            document_id,
            updates,
        } => {
            handlers
                .update_document(UpdateDocumentRequest {
                    document_id,
                    updates: Some(updates),
                })
                .await
        }
        Commands::CreateLookup {
            lookup_type,
            data,
            parent_id,
            match_value,
            matching_algorithm,
            no_auto_match,
            permissions,
        } => {
            handlers
                .create_lookup(CreateLookupRequest {
                    lookup_type,
                    data: Some(data),
                    parent_id,
                    match_value,
                    matching_algorithm: matching_algorithm.map(parse_algorithm_flag),
                    auto_match: !no_auto_match,
                    permissions,
                })
                .await
        }
        Commands::ListLookups {
            refresh,
            include,
            fields,
        } => {
            handlers
                .list_lookups(ListLookupsRequest {
                    refresh,
                    include,
                    fields,
                })
                .await
        }
        Commands::Serve | Commands::Healthcheck => unreachable!("handled by main"),
    }
}

/// Integer algorithm codes arrive as plain digits on the command line.
fn parse_algorithm_flag(raw: String) -> Value {
    match raw.trim().parse::<i64>() {
        Ok(code) => json!(code),
        Err(_) => Value::String(raw),
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
