//! HTTP client for the Paperless-ngx REST API
//!
//! A thin wrapper over reqwest that owns the base URL, auth header,
//! timeout and TLS mode from [`PaperlessConfig`], and classifies failures
//! into the tool error taxonomy. Every call is a single attempt; retry
//! policy belongs to callers.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::multipart::Form;
use serde_json::Value;

use crate::config::{PaperlessConfig, TlsVerify};
use crate::error::{Result, ToolError};
use crate::lookups::RemoteItem;

/// Maximum number of response-body characters carried in HTTP error
/// payloads.
const ERROR_BODY_LIMIT: usize = 500;

/// Client for the Paperless-ngx API.
pub struct PaperlessClient {
    http: reqwest::Client,
    base_url: String,
    max_page_size: u32,
}

impl PaperlessClient {
    /// Build a client from resolved configuration.
    ///
    /// Fails with a `config_error` when the token is not a valid header
    /// value or the CA bundle cannot be loaded.
    pub fn new(config: &PaperlessConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let auth = HeaderValue::from_str(&config.auth_header_value())
            .map_err(|_| ToolError::Config("PAPERLESS_TOKEN contains invalid characters.".to_string()))?;
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers);

        match &config.tls_verify {
            TlsVerify::Disabled => {
                builder = builder.danger_accept_invalid_certs(true);
            }
            TlsVerify::Enabled => {}
            TlsVerify::CaBundle(path) => {
                let pem = std::fs::read(path).map_err(|e| {
                    ToolError::Config(format!(
                        "Failed to read CA bundle {}: {e}",
                        path.display()
                    ))
                })?;
                let certificate = reqwest::Certificate::from_pem(&pem).map_err(|e| {
                    ToolError::Config(format!(
                        "Invalid CA bundle {}: {e}",
                        path.display()
                    ))
                })?;
                builder = builder.add_root_certificate(certificate);
            }
        }

        let http = builder
            .build()
            .map_err(|e| ToolError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            max_page_size: config.max_page_size,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET a JSON payload with query parameters.
    pub async fn get_json(&self, path: &str, params: &[(String, String)]) -> Result<Value> {
        let request = self.http.get(self.url(path)).query(params);
        self.send_expect_json(request, "Paperless").await
    }

    /// PATCH a JSON body and return the JSON response.
    pub async fn patch_json(&self, path: &str, body: &Value) -> Result<Value> {
        let request = self.http.patch(self.url(path)).json(body);
        self.send_expect_json(request, "Paperless").await
    }

    /// POST a JSON body and return the JSON response.
    pub async fn post_json(&self, path: &str, body: &Value) -> Result<Value> {
        let request = self.http.post(self.url(path)).json(body);
        self.send_expect_json(request, "Paperless").await
    }

    /// POST a multipart form and return the JSON response.
    pub async fn post_multipart(&self, path: &str, form: Form) -> Result<Value> {
        let request = self.http.post(self.url(path)).multipart(form);
        self.send_expect_json(request, "Paperless").await
    }

    /// Walk a paged list endpoint to completion.
    ///
    /// Requests pages starting at 1 with the configured maximum page
    /// size, collecting only object-valued entries of each page's
    /// `results` list, until the response carries no further `next`
    /// marker. Any page failure aborts the whole fetch; prior pages are
    /// discarded.
    pub async fn fetch_paginated(&self, endpoint: &str, label: &str) -> Result<Vec<RemoteItem>> {
        let mut results: Vec<RemoteItem> = Vec::new();
        let mut page: u64 = 1;

        loop {
            let params = [
                ("page".to_string(), page.to_string()),
                ("page_size".to_string(), self.max_page_size.to_string()),
            ];
            let request = self.http.get(self.url(endpoint)).query(&params);
            let payload = self.send_expect_json(request, label).await?;

            let Value::Object(payload) = payload else {
                return Err(ToolError::UnexpectedResponse(format!(
                    "{label} returned non-object JSON."
                )));
            };
            let Some(Value::Array(page_results)) = payload.get("results") else {
                return Err(ToolError::UnexpectedResponse(format!(
                    "{label} response missing results list."
                )));
            };

            for item in page_results {
                if let Value::Object(map) = item {
                    results.push(map.clone());
                }
            }

            if !is_truthy(payload.get("next")) {
                break;
            }
            page += 1;
        }

        tracing::debug!(endpoint, total = results.len(), "paginated fetch complete");
        Ok(results)
    }

    async fn send_expect_json(
        &self,
        request: reqwest::RequestBuilder,
        label: &str,
    ) -> Result<Value> {
        let response = request
            .send()
            .await
            .map_err(|e| ToolError::PaperlessRequest(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ToolError::PaperlessRequest(e.to_string()))?;

        if !status.is_success() {
            return Err(ToolError::PaperlessHttp {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|_| {
            ToolError::UnexpectedResponse(format!("{label} returned invalid JSON."))
        })
    }
}

/// Paperless marks the last page by a null/absent `next` pointer; treat
/// anything empty-ish the same way.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}

fn truncate_body(body: &str) -> String {
    body.chars().take(ERROR_BODY_LIMIT).collect()
}
