//! Integration tests for the lookup subsystem
//!
//! Drives the tool handlers against a stub Paperless server: paginated
//! fetching, cache TTL behavior, cache invalidation after creation, and
//! per-category partial failure in list_lookups.

use std::time::Duration;

use serde_json::{json, Value};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use paperless_mcp::config::{PaperlessConfig, TlsVerify};
use paperless_mcp::mcp::types::{CreateLookupRequest, ListLookupsRequest};
use paperless_mcp::mcp::ToolHandlers;

fn handlers_for(server: &MockServer, cache_ttl: Duration) -> ToolHandlers {
    let config = PaperlessConfig {
        base_url: server.uri(),
        token: "test-token".to_string(),
        timeout: Duration::from_secs(5),
        tls_verify: TlsVerify::Enabled,
        lookup_cache_ttl: cache_ttl,
        default_page_size: 25,
        max_page_size: 100,
    };
    ToolHandlers::new(config).unwrap()
}

fn tags_only() -> ListLookupsRequest {
    ListLookupsRequest {
        refresh: false,
        include: Some(vec!["tags".to_string()]),
        fields: None,
    }
}

fn page_body(ids: &[i64], next: Value) -> Value {
    json!({
        "count": ids.len(),
        "next": next,
        "results": ids
            .iter()
            .map(|id| json!({"id": id, "name": format!("tag-{id}")}))
            .collect::<Vec<_>>(),
    })
}

#[tokio::test]
async fn test_three_page_fetch_accumulates_in_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags/"))
        .and(query_param("page", "1"))
        .and(query_param("page_size", "100"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_body(&[1, 2], json!("/api/tags/?page=2"))),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/tags/"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_body(&[3, 4], json!("/api/tags/?page=3"))),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/tags/"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&[5], Value::Null)))
        .expect(1)
        .mount(&server)
        .await;

    let handlers = handlers_for(&server, Duration::from_secs(300));
    let result = handlers.list_lookups(tags_only()).await.unwrap();

    let tags = result["tags"].as_array().unwrap();
    assert_eq!(tags.len(), 5);
    let ids: Vec<i64> = tags.iter().map(|t| t["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    assert_eq!(result["counts"]["tags"], json!(5));
    assert!(result.get("errors").is_none());
}

#[tokio::test]
async fn test_auth_header_sent_on_lookup_fetch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags/"))
        .and(wiremock::matchers::header("Authorization", "Token test-token"))
        .and(wiremock::matchers::header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&[1], Value::Null)))
        .expect(1)
        .mount(&server)
        .await;

    let handlers = handlers_for(&server, Duration::from_secs(300));
    let result = handlers.list_lookups(tags_only()).await.unwrap();
    assert_eq!(result["counts"]["tags"], json!(1));
}

#[tokio::test]
async fn test_mid_fetch_http_error_discards_prior_pages() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags/"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_body(&[1, 2], json!("/api/tags/?page=2"))),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/tags/"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(502).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let handlers = handlers_for(&server, Duration::from_secs(300));
    let result = handlers.list_lookups(tags_only()).await.unwrap();

    // The category failed as a whole; no partial page-1 data survives.
    assert!(result.get("tags").is_none());
    assert!(result["counts"].as_object().unwrap().is_empty());
    let error = &result["errors"]["tags"];
    assert_eq!(error["error"], "paperless_http_error");
    assert_eq!(error["status_code"], 502);
    assert_eq!(error["message"], "upstream unavailable");
}

#[tokio::test]
async fn test_invalid_json_and_missing_results_are_unexpected_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/correspondents/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"next": null})))
        .mount(&server)
        .await;

    let handlers = handlers_for(&server, Duration::from_secs(300));
    let result = handlers
        .list_lookups(ListLookupsRequest {
            refresh: false,
            include: Some(vec!["tags".to_string(), "correspondents".to_string()]),
            fields: None,
        })
        .await
        .unwrap();

    assert_eq!(result["errors"]["tags"]["error"], "unexpected_response");
    assert!(result["errors"]["tags"]["message"]
        .as_str()
        .unwrap()
        .contains("invalid JSON"));
    assert_eq!(
        result["errors"]["correspondents"]["error"],
        "unexpected_response"
    );
    assert!(result["errors"]["correspondents"]["message"]
        .as_str()
        .unwrap()
        .contains("missing results list"));
}

#[tokio::test]
async fn test_cache_serves_second_listing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&[1], Value::Null)))
        .expect(1)
        .mount(&server)
        .await;

    let handlers = handlers_for(&server, Duration::from_secs(300));
    handlers.list_lookups(tags_only()).await.unwrap();
    // Second call must be served from cache; the expect(1) above verifies
    // no further request reaches the stub.
    let result = handlers.list_lookups(tags_only()).await.unwrap();
    assert_eq!(result["counts"]["tags"], json!(1));
}

#[tokio::test]
async fn test_refresh_bypasses_cache() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&[1], Value::Null)))
        .expect(2)
        .mount(&server)
        .await;

    let handlers = handlers_for(&server, Duration::from_secs(300));
    handlers.list_lookups(tags_only()).await.unwrap();
    handlers
        .list_lookups(ListLookupsRequest {
            refresh: true,
            include: Some(vec!["tags".to_string()]),
            fields: None,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_zero_ttl_disables_caching() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&[1], Value::Null)))
        .expect(2)
        .mount(&server)
        .await;

    let handlers = handlers_for(&server, Duration::ZERO);
    handlers.list_lookups(tags_only()).await.unwrap();
    handlers.list_lookups(tags_only()).await.unwrap();
}

#[tokio::test]
async fn test_field_filtering_projects_missing_keys_to_null() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&[7], Value::Null)))
        .mount(&server)
        .await;

    let handlers = handlers_for(&server, Duration::from_secs(300));
    let result = handlers
        .list_lookups(ListLookupsRequest {
            refresh: false,
            include: Some(vec!["tags".to_string()]),
            fields: Some(vec!["id".to_string(), "slug".to_string()]),
        })
        .await
        .unwrap();

    let tag = &result["tags"][0];
    assert_eq!(tag["id"], json!(7));
    assert_eq!(tag["slug"], Value::Null);
    assert!(tag.get("name").is_none());
}

#[tokio::test]
async fn test_create_lookup_defaults_matching_algorithm_to_auto() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/tags/"))
        .and(body_json(json!({"name": "Invoices", "matching_algorithm": 6})))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"id": 10, "name": "Invoices"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let handlers = handlers_for(&server, Duration::from_secs(300));
    let created = handlers
        .create_lookup(CreateLookupRequest {
            lookup_type: "tags".to_string(),
            data: Some(serde_json::from_value(json!({"name": "Invoices"})).unwrap()),
            parent_id: None,
            match_value: None,
            matching_algorithm: None,
            auto_match: true,
            permissions: None,
        })
        .await
        .unwrap();
    assert_eq!(created["id"], json!(10));
}

#[tokio::test]
async fn test_create_lookup_normalizes_label_and_overlays_fields() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/tags/"))
        .and(body_json(json!({
            "name": "Receipts",
            "parent": 4,
            "match": "receipt",
            "matching_algorithm": 4,
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 11})))
        .expect(1)
        .mount(&server)
        .await;

    let handlers = handlers_for(&server, Duration::from_secs(300));
    handlers
        .create_lookup(CreateLookupRequest {
            // Singular alias resolves to the tags endpoint.
            lookup_type: "tag".to_string(),
            data: Some(serde_json::from_value(json!({"name": "Receipts"})).unwrap()),
            parent_id: Some(4),
            match_value: Some("receipt".to_string()),
            matching_algorithm: Some(json!("REGEX")),
            auto_match: true,
            permissions: None,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_create_lookup_null_algorithm_in_data_is_dropped_then_defaulted() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/tags/"))
        .and(body_json(json!({"name": "Taxes", "matching_algorithm": 6})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 12})))
        .expect(1)
        .mount(&server)
        .await;

    let handlers = handlers_for(&server, Duration::from_secs(300));
    handlers
        .create_lookup(CreateLookupRequest {
            lookup_type: "tags".to_string(),
            data: Some(
                serde_json::from_value(json!({"name": "Taxes", "matching_algorithm": null}))
                    .unwrap(),
            ),
            parent_id: None,
            match_value: None,
            matching_algorithm: None,
            auto_match: true,
            permissions: None,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_create_lookup_custom_fields_never_auto_matches() {
    let server = MockServer::start().await;

    // Exact body match: no matching_algorithm key may be present.
    Mock::given(method("POST"))
        .and(path("/api/custom_fields/"))
        .and(body_json(json!({"name": "Reference", "data_type": "string"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 3})))
        .expect(1)
        .mount(&server)
        .await;

    let handlers = handlers_for(&server, Duration::from_secs(300));
    handlers
        .create_lookup(CreateLookupRequest {
            lookup_type: "custom_field".to_string(),
            data: Some(
                serde_json::from_value(json!({"name": "Reference", "data_type": "string"}))
                    .unwrap(),
            ),
            parent_id: None,
            match_value: None,
            matching_algorithm: None,
            auto_match: true,
            permissions: None,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_create_lookup_invalidates_category_cache() {
    let server = MockServer::start().await;

    // Two listing fetches expected: the initial fill and the refill
    // after creation invalidated the entry.
    Mock::given(method("GET"))
        .and(path("/api/tags/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&[1], Value::Null)))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/tags/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 2, "name": "New"})))
        .expect(1)
        .mount(&server)
        .await;

    let handlers = handlers_for(&server, Duration::from_secs(300));
    handlers.list_lookups(tags_only()).await.unwrap();
    handlers
        .create_lookup(CreateLookupRequest {
            lookup_type: "tags".to_string(),
            data: Some(serde_json::from_value(json!({"name": "New"})).unwrap()),
            parent_id: None,
            match_value: None,
            matching_algorithm: None,
            auto_match: true,
            permissions: None,
        })
        .await
        .unwrap();
    handlers.list_lookups(tags_only()).await.unwrap();
}

#[tokio::test]
async fn test_partial_failure_keeps_successful_categories() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&[1], Value::Null)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/correspondents/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let handlers = handlers_for(&server, Duration::from_secs(300));
    let result = handlers
        .list_lookups(ListLookupsRequest {
            refresh: false,
            include: Some(vec!["tags".to_string(), "correspondents".to_string()]),
            fields: None,
        })
        .await
        .unwrap();

    assert_eq!(result["counts"]["tags"], json!(1));
    assert_eq!(result["tags"].as_array().unwrap().len(), 1);
    assert_eq!(
        result["errors"]["correspondents"]["error"],
        "paperless_http_error"
    );
    assert!(result["counts"].get("correspondents").is_none());
}

#[tokio::test]
async fn test_transport_failure_is_request_error() {
    // Point at a server that was shut down so the connection is refused.
    let server = MockServer::start().await;
    let handlers = handlers_for(&server, Duration::from_secs(300));
    drop(server);

    let result = handlers.list_lookups(tags_only()).await.unwrap();
    assert_eq!(result["errors"]["tags"]["error"], "paperless_request_error");
}
