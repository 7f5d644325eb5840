//! Request normalization helpers
//!
//! Pure functions that turn caller input into request-ready forms: page
//! sizes clamped to bounds, field projections, multipart form pairs, and
//! the query-parameter set for document searches.

use serde_json::{json, Map, Value};

use crate::lookups::RemoteItem;
use crate::mcp::types::SearchDocumentsRequest;

/// Clamp a requested page size to `[1, max]`, substituting the default
/// for anything below 1.
pub fn normalize_page_size(page_size: i64, default: u32, max: u32) -> u32 {
    if page_size < 1 {
        return default;
    }
    (page_size as u64).min(max as u64) as u32
}

/// Trim requested field names and drop blanks; an empty result means
/// "no projection".
pub fn normalize_fields(fields: Option<&[String]>) -> Option<Vec<String>> {
    let fields = fields?;
    let cleaned: Vec<String> = fields
        .iter()
        .map(|field| field.trim())
        .filter(|field| !field.is_empty())
        .map(str::to_string)
        .collect();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Project items to the requested keys. Without a projection the items
/// pass through unchanged; with one, missing keys become null rather
/// than being omitted.
pub fn filter_fields(items: Vec<RemoteItem>, fields: Option<&[String]>) -> Vec<RemoteItem> {
    let Some(normalized) = normalize_fields(fields) else {
        return items;
    };
    items
        .into_iter()
        .map(|item| {
            let mut projected = Map::new();
            for key in &normalized {
                projected.insert(
                    key.clone(),
                    item.get(key).cloned().unwrap_or(Value::Null),
                );
            }
            projected
        })
        .collect()
}

fn scalar_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(true) => "true".to_string(),
        Value::Bool(false) => "false".to_string(),
        other => other.to_string(),
    }
}

/// Flatten document metadata into ordered form pairs for multipart
/// encoding.
///
/// Null values are dropped, booleans become "true"/"false", flat lists
/// are sent as repeated pairs of the same key, and anything with nested
/// structure (objects, or lists containing collections) is JSON-encoded
/// into a single pair.
pub fn normalize_metadata(metadata: Option<&Map<String, Value>>) -> Vec<(String, String)> {
    let Some(metadata) = metadata else {
        return Vec::new();
    };
    let mut pairs = Vec::new();
    for (key, value) in metadata {
        let key = key.trim();
        if key.is_empty() || value.is_null() {
            continue;
        }
        match value {
            Value::Array(items) => {
                let nested = items
                    .iter()
                    .any(|item| item.is_array() || item.is_object());
                if nested {
                    pairs.push((key.to_string(), value.to_string()));
                } else {
                    for item in items {
                        if item.is_null() {
                            continue;
                        }
                        pairs.push((key.to_string(), scalar_string(item)));
                    }
                }
            }
            Value::Object(_) => pairs.push((key.to_string(), value.to_string())),
            other => pairs.push((key.to_string(), scalar_string(other))),
        }
    }
    pairs
}

/// Assemble the query parameters for a document search.
pub fn build_search_params(
    request: &SearchDocumentsRequest,
    default_page_size: u32,
    max_page_size: u32,
) -> Vec<(String, String)> {
    let mut params = vec![
        ("page".to_string(), request.page.max(1).to_string()),
        (
            "page_size".to_string(),
            normalize_page_size(request.page_size, default_page_size, max_page_size).to_string(),
        ),
    ];

    let query = request.query.trim();
    if !query.is_empty() {
        params.push(("query".to_string(), query.to_string()));
    }

    if let Some(tag_id) = request.tag_id {
        params.push(("tags__id".to_string(), tag_id.to_string()));
    }
    if let Some(correspondent_id) = request.correspondent_id {
        params.push(("correspondent__id".to_string(), correspondent_id.to_string()));
    }
    if let Some(document_type_id) = request.document_type_id {
        params.push(("document_type__id".to_string(), document_type_id.to_string()));
    }
    if let Some(created_from) = request.created_from.as_deref() {
        let created_from = created_from.trim();
        if !created_from.is_empty() {
            params.push(("created__date__gte".to_string(), created_from.to_string()));
        }
    }
    if let Some(created_to) = request.created_to.as_deref() {
        let created_to = created_to.trim();
        if !created_to.is_empty() {
            params.push(("created__date__lte".to_string(), created_to.to_string()));
        }
    }

    if let Some(custom_filters) = &request.custom_filters {
        for (key, value) in custom_filters {
            let key = key.trim();
            if key.is_empty() || value.is_null() {
                continue;
            }
            match value {
                Value::String(raw) => {
                    let trimmed = raw.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    params.push((key.to_string(), trimmed.to_string()));
                }
                other => params.push((key.to_string(), scalar_string(other))),
            }
        }
    }

    params
}

/// Reduce a full document record to the compact summary returned by
/// search results.
pub fn compact_document(document: &RemoteItem) -> Value {
    json!({
        "id": document.get("id").cloned().unwrap_or(Value::Null),
        "title": document.get("title").cloned().unwrap_or(Value::Null),
        "created": document.get("created").cloned().unwrap_or(Value::Null),
        "modified": document.get("modified").cloned().unwrap_or(Value::Null),
        "document_type": document.get("document_type").cloned().unwrap_or(Value::Null),
        "correspondent": document.get("correspondent").cloned().unwrap_or(Value::Null),
        "tags": document.get("tags").cloned().unwrap_or_else(|| json!([])),
        "original_file_name": document
            .get("original_file_name")
            .cloned()
            .unwrap_or(Value::Null),
    })
}
