//! Request types for the Paperless tool operations

use serde::Deserialize;
use serde_json::{Map, Value};

fn default_page() -> i64 {
    1
}

fn default_true() -> bool {
    true
}

/// Arguments for searching documents
#[derive(Debug, Default, Deserialize)]
pub struct SearchDocumentsRequest {
    /// Full-text search string; empty lists recent documents
    #[serde(default)]
    pub query: String,
    /// 1-based page index
    #[serde(default = "default_page")]
    pub page: i64,
    /// Items per page; values below 1 fall back to the configured default
    #[serde(default)]
    pub page_size: i64,
    /// Filter by tag ID
    pub tag_id: Option<i64>,
    /// Filter by correspondent ID
    pub correspondent_id: Option<i64>,
    /// Filter by document type ID
    pub document_type_id: Option<i64>,
    /// Lower bound (YYYY-MM-DD) on the created date
    pub created_from: Option<String>,
    /// Upper bound (YYYY-MM-DD) on the created date
    pub created_to: Option<String>,
    /// Raw Paperless filter keys and values, merged verbatim
    pub custom_filters: Option<Map<String, Value>>,
}

/// Arguments for fetching a single document
#[derive(Debug, Deserialize)]
pub struct GetDocumentRequest {
    /// Numeric Paperless document ID
    pub document_id: i64,
}

/// Arguments for uploading a document
#[derive(Debug, Deserialize)]
pub struct UploadDocumentRequest {
    /// Path to the file on disk
    pub file_path: String,
    /// Paperless fields to send alongside the file
    pub metadata: Option<Map<String, Value>>,
    /// Filename override for the uploaded file
    pub filename: Option<String>,
}

/// Arguments for updating a document
#[derive(Debug, Deserialize)]
pub struct UpdateDocumentRequest {
    /// Numeric Paperless document ID
    pub document_id: i64,
    /// Fields to update; must be a non-empty object
    pub updates: Option<Map<String, Value>>,
}

/// Arguments for creating a lookup item
#[derive(Debug, Deserialize)]
pub struct CreateLookupRequest {
    /// Category name; singular aliases are accepted
    #[serde(default)]
    pub lookup_type: String,
    /// Fields for the new object, e.g. {"name": "Invoices"}
    pub data: Option<Map<String, Value>>,
    /// Parent tag ID; tags only
    pub parent_id: Option<i64>,
    /// Match string for automatic tagging
    #[serde(rename = "match")]
    pub match_value: Option<String>,
    /// Match algorithm, as an integer code or a label
    pub matching_algorithm: Option<Value>,
    /// Default the matching algorithm to auto when the category supports it
    #[serde(default = "default_true")]
    pub auto_match: bool,
    /// User IDs to grant access; must be a list when present
    pub permissions: Option<Value>,
}

/// Arguments for listing lookup categories
#[derive(Debug, Default, Deserialize)]
pub struct ListLookupsRequest {
    /// Bypass the cache and fetch from Paperless now
    #[serde(default)]
    pub refresh: bool,
    /// Subset of category names to return; all five when omitted
    pub include: Option<Vec<String>>,
    /// Keys to keep in each returned item; full objects when omitted
    pub fields: Option<Vec<String>>,
}
