//! Business logic for the Paperless tool operations
//!
//! Each handler is a single synchronous transaction against the remote
//! API: normalize inputs, issue the calls, shape a success payload or a
//! typed error. The handlers own the shared state (config, HTTP client,
//! lookup cache) and are shared across concurrent tool dispatches.

use serde_json::{json, Map, Value};
use std::collections::BTreeSet;
use std::path::Path;

use crate::client::PaperlessClient;
use crate::config::PaperlessConfig;
use crate::error::{Result, ToolError};
use crate::lookups::{
    normalize_lookup_type, normalize_matching_algorithm, LookupCache, LookupCategory, RemoteItem,
    MATCHING_ALGORITHM_AUTO,
};
use crate::mcp::types::{
    CreateLookupRequest, GetDocumentRequest, ListLookupsRequest, SearchDocumentsRequest,
    UpdateDocumentRequest, UploadDocumentRequest,
};
use crate::normalize::{build_search_params, compact_document, filter_fields, normalize_metadata};

/// Shared state and operation implementations for the seven tools.
pub struct ToolHandlers {
    config: PaperlessConfig,
    client: PaperlessClient,
    cache: LookupCache,
}

impl ToolHandlers {
    /// Build handlers from resolved configuration.
    pub fn new(config: PaperlessConfig) -> Result<Self> {
        let client = PaperlessClient::new(&config)?;
        let cache = LookupCache::new(config.lookup_cache_ttl);
        Ok(Self {
            config,
            client,
            cache,
        })
    }

    /// Liveness probe; no configuration or network involved.
    pub fn healthcheck(&self) -> Value {
        json!("ok")
    }

    /// Search documents by text query and optional filters.
    pub async fn search_documents(&self, request: SearchDocumentsRequest) -> Result<Value> {
        let params = build_search_params(
            &request,
            self.config.default_page_size,
            self.config.max_page_size,
        );
        tracing::info!("search_documents started");
        tracing::debug!(?params, "search_documents params");

        let payload = self.client.get_json("/api/documents/", &params).await?;
        let payload = expect_object(payload)?;
        let Some(Value::Array(results)) = payload.get("results") else {
            return Err(ToolError::UnexpectedResponse(
                "Paperless response missing results list.".to_string(),
            ));
        };

        let summaries: Vec<Value> = results
            .iter()
            .filter_map(Value::as_object)
            .map(compact_document)
            .collect();
        let count = payload
            .get("count")
            .cloned()
            .unwrap_or_else(|| json!(results.len()));
        tracing::info!(total = %count, returned = summaries.len(), "search_documents completed");

        Ok(json!({
            "count": count,
            "next": payload.get("next").cloned().unwrap_or(Value::Null),
            "previous": payload.get("previous").cloned().unwrap_or(Value::Null),
            "results": summaries,
        }))
    }

    /// Fetch a single document by ID, returning the raw record.
    pub async fn get_document(&self, request: GetDocumentRequest) -> Result<Value> {
        let document_id = validate_document_id(request.document_id)?;
        tracing::info!(document_id, "get_document started");

        let payload = self
            .client
            .get_json(&format!("/api/documents/{document_id}/"), &[])
            .await?;
        let payload = expect_object(payload)?;
        tracing::info!(document_id, "get_document completed");
        Ok(Value::Object(payload))
    }

    /// Upload a local file with optional metadata fields.
    pub async fn upload_document(&self, request: UploadDocumentRequest) -> Result<Value> {
        let file_path = request.file_path.trim();
        if file_path.is_empty() {
            return Err(ToolError::invalid_request("file_path is required."));
        }
        let path = Path::new(file_path);
        if !path.is_file() {
            return Err(ToolError::FileNotFound(file_path.to_string()));
        }

        let upload_name = request
            .filename
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| {
                path.file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| file_path.to_string())
            });
        tracing::info!(filename = %upload_name, "upload_document started");

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ToolError::File(e.to_string()))?;

        let mut form = reqwest::multipart::Form::new();
        for (key, value) in normalize_metadata(request.metadata.as_ref()) {
            form = form.text(key, value);
        }
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(upload_name)
            .mime_str("application/octet-stream")
            .map_err(|e| ToolError::File(e.to_string()))?;
        form = form.part("document", part);

        let payload = self
            .client
            .post_multipart("/api/documents/post_document/", form)
            .await?;
        let payload = expect_object(payload)?;
        tracing::info!("upload_document completed");
        Ok(Value::Object(payload))
    }

    /// Patch fields of an existing document.
    pub async fn update_document(&self, request: UpdateDocumentRequest) -> Result<Value> {
        let document_id = validate_document_id(request.document_id)?;
        let updates = request
            .updates
            .filter(|updates| !updates.is_empty())
            .ok_or_else(|| ToolError::invalid_request("updates must be a non-empty object."))?;

        tracing::info!(document_id, "update_document started");
        tracing::debug!(?updates, "update_document payload");

        let payload = self
            .client
            .patch_json(
                &format!("/api/documents/{document_id}/"),
                &Value::Object(updates),
            )
            .await?;
        let payload = expect_object(payload)?;
        tracing::info!(document_id, "update_document completed");
        Ok(Value::Object(payload))
    }

    /// Create a lookup item (tag, document type, correspondent, storage
    /// path, or custom field) and invalidate that category's cache.
    pub async fn create_lookup(&self, request: CreateLookupRequest) -> Result<Value> {
        let Some(category) = normalize_lookup_type(&request.lookup_type) else {
            return Err(ToolError::InvalidRequest {
                message: "lookup_type is required.".to_string(),
                allowed: Some(LookupCategory::allowed_names()),
            });
        };
        let mut payload = request
            .data
            .filter(|data| !data.is_empty())
            .ok_or_else(|| ToolError::invalid_request("data must be a non-empty object."))?;

        if let Some(parent_id) = request.parent_id {
            if category != LookupCategory::Tags {
                return Err(ToolError::invalid_request(
                    "parent_id is only supported for tags.",
                ));
            }
            payload.insert("parent".to_string(), json!(parent_id));
        }
        if let Some(match_value) = request.match_value {
            payload.insert("match".to_string(), json!(match_value));
        }
        if let Some(matching_algorithm) = request.matching_algorithm {
            payload.insert("matching_algorithm".to_string(), matching_algorithm);
        }
        if let Some(permissions) = request.permissions {
            if !permissions.is_array() {
                return Err(ToolError::invalid_request(
                    "permissions must be a list of user ids.",
                ));
            }
            payload.insert("permissions".to_string(), permissions);
        }

        // An explicit null clears the algorithm; anything else runs
        // through the lexicon.
        match payload.get("matching_algorithm").cloned() {
            Some(Value::Null) => {
                payload.remove("matching_algorithm");
            }
            Some(value) => {
                payload.insert(
                    "matching_algorithm".to_string(),
                    normalize_matching_algorithm(value),
                );
            }
            None => {}
        }
        if request.auto_match
            && category.supports_matching()
            && !payload.contains_key("matching_algorithm")
        {
            payload.insert(
                "matching_algorithm".to_string(),
                json!(MATCHING_ALGORITHM_AUTO),
            );
        }

        tracing::info!(lookup_type = category.as_str(), "create_lookup started");
        let created = self
            .client
            .post_json(category.endpoint(), &Value::Object(payload))
            .await?;
        self.cache.invalidate(category);
        tracing::info!(lookup_type = category.as_str(), "create_lookup completed");
        Ok(created)
    }

    /// List lookup categories, serving from cache where fresh.
    ///
    /// Failures are collected per category; one category's error never
    /// blocks the others.
    pub async fn list_lookups(&self, request: ListLookupsRequest) -> Result<Value> {
        let selected = select_categories(request.include.as_deref())?;

        let mut data = Map::new();
        let mut counts = Map::new();
        let mut errors = Map::new();

        for category in selected {
            match self.fetch_lookup(category, request.refresh).await {
                Ok((items, cache_hit)) => {
                    tracing::info!(
                        category = category.as_str(),
                        cache_hit,
                        count = items.len(),
                        "list_lookups fetched"
                    );
                    counts.insert(category.as_str().to_string(), json!(items.len()));
                    let filtered = filter_fields(items, request.fields.as_deref());
                    data.insert(
                        category.as_str().to_string(),
                        Value::Array(filtered.into_iter().map(Value::Object).collect()),
                    );
                }
                Err(err) => {
                    tracing::error!(
                        category = category.as_str(),
                        error = %err,
                        "list_lookups failed for category"
                    );
                    errors.insert(category.as_str().to_string(), err.payload());
                }
            }
        }

        data.insert("counts".to_string(), Value::Object(counts));
        if !errors.is_empty() {
            data.insert("errors".to_string(), Value::Object(errors));
        }
        Ok(Value::Object(data))
    }

    /// Cached items for a category, falling through to a full paginated
    /// fetch on miss or forced refresh. Returns the items and whether
    /// the cache served them.
    async fn fetch_lookup(
        &self,
        category: LookupCategory,
        refresh: bool,
    ) -> Result<(Vec<RemoteItem>, bool)> {
        if !refresh {
            if let Some(items) = self.cache.get(category) {
                return Ok((items, true));
            }
        }
        let items = self
            .client
            .fetch_paginated(category.endpoint(), category.as_str())
            .await?;
        self.cache.put(category, items.clone());
        Ok((items, false))
    }
}

fn validate_document_id(document_id: i64) -> Result<i64> {
    if document_id <= 0 {
        return Err(ToolError::invalid_request("document_id must be positive."));
    }
    Ok(document_id)
}

fn expect_object(payload: Value) -> Result<Map<String, Value>> {
    match payload {
        Value::Object(map) => Ok(map),
        _ => Err(ToolError::UnexpectedResponse(
            "Paperless returned non-object JSON.".to_string(),
        )),
    }
}

/// Resolve the ordered set of categories to fetch, validating any
/// caller-supplied subset against the canonical names.
fn select_categories(include: Option<&[String]>) -> Result<Vec<LookupCategory>> {
    let Some(include) = include else {
        return Ok(LookupCategory::ALL.to_vec());
    };
    let cleaned: BTreeSet<&str> = include
        .iter()
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .collect();
    if cleaned.is_empty() {
        return Ok(LookupCategory::ALL.to_vec());
    }

    let invalid: Vec<&str> = cleaned
        .iter()
        .copied()
        .filter(|name| !LookupCategory::ALL.iter().any(|c| c.as_str() == *name))
        .collect();
    if !invalid.is_empty() {
        return Err(ToolError::InvalidRequest {
            message: format!("Unknown lookup types: {}", invalid.join(", ")),
            allowed: Some(LookupCategory::allowed_names()),
        });
    }

    Ok(LookupCategory::ALL
        .iter()
        .copied()
        .filter(|category| cleaned.contains(category.as_str()))
        .collect())
}
