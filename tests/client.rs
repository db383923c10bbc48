//! HTTP mock tests for the Notion client.
//!
//! Uses wiremock to stand in for api.notion.com.

use notion_mcp::types::{
    CommentTarget, CreateCommentParams, Pagination, Parent, SearchFilter, SearchObject,
    SearchParams,
};
use notion_mcp::{rich_text, ClientConfig, McpError, NotionClient, NOTION_VERSION};
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PAGE_ID: &str = "1a2b3c4d-5e6f-7a8b-9c0d-1e2f3a4b5c6d";

fn client_for(server: &MockServer) -> NotionClient {
    let config = ClientConfig::new("test-token")
        .unwrap()
        .with_base_url(Url::parse(&server.uri()).unwrap());
    NotionClient::new(config)
}

// =============================================================================
// Headers and success pass-through
// =============================================================================

#[tokio::test]
async fn test_every_request_carries_auth_and_version_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/users/me"))
        .and(header("Authorization", "Bearer test-token"))
        .and(header("Notion-Version", NOTION_VERSION))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "user",
            "id": "bot",
            "type": "bot"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let me = client_for(&server).get_me().await.unwrap();
    assert_eq!(me["type"], "bot");
}

#[tokio::test]
async fn test_unknown_fields_pass_through() {
    let server = MockServer::start().await;
    let body = json!({
        "object": "page",
        "id": PAGE_ID,
        "some_future_field": { "nested": [1, 2, 3] }
    });

    Mock::given(method("GET"))
        .and(path(format!("/v1/pages/{}", PAGE_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .mount(&server)
        .await;

    let page = client_for(&server)
        .get_page("1A2B3C4D5E6F7A8B9C0D1E2F3A4B5C6D")
        .await
        .unwrap();
    assert_eq!(page, body);
}

#[tokio::test]
async fn test_pagination_is_sent_as_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/v1/blocks/{}/children", PAGE_ID)))
        .and(query_param("start_cursor", "next"))
        .and(query_param("page_size", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [], "has_more": false, "next_cursor": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let pagination = Pagination {
        start_cursor: Some("next".to_string()),
        page_size: Some(10),
    };
    client_for(&server)
        .get_block_children(PAGE_ID, &pagination)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_list_comments_uses_block_id_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/comments"))
        .and(query_param("block_id", PAGE_ID))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .list_comments(&PAGE_ID.replace('-', ""), &Pagination::default())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_search_posts_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/search"))
        .and(body_json(json!({
            "query": "notes",
            "filter": { "property": "object", "value": "database" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let params = SearchParams {
        query: Some("notes".to_string()),
        filter: Some(SearchFilter::object(SearchObject::Database)),
        ..Default::default()
    };
    client_for(&server).search(&params).await.unwrap();
}

#[tokio::test]
async fn test_comment_parent_id_is_normalized() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/comments"))
        .and(body_json(json!({
            "parent": { "block_id": PAGE_ID },
            "rich_text": [{ "type": "text", "text": { "content": "hi" } }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "object": "comment" })))
        .expect(1)
        .mount(&server)
        .await;

    let params = CreateCommentParams {
        target: CommentTarget::Parent(Parent::BlockId(PAGE_ID.replace('-', ""))),
        rich_text: rich_text("hi"),
    };
    client_for(&server).create_comment(&params).await.unwrap();
}

#[tokio::test]
async fn test_base_url_path_prefix_is_kept() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/notion/v1/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "object": "user" })))
        .expect(2)
        .mount(&server)
        .await;

    for base in [format!("{}/notion/", server.uri()), format!("{}/notion", server.uri())] {
        let config = ClientConfig::new("test-token")
            .unwrap()
            .with_base_url(Url::parse(&base).unwrap());
        let me = NotionClient::new(config).get_me().await.unwrap();
        assert_eq!(me["object"], "user");
    }
}

// =============================================================================
// Error translation
// =============================================================================

#[tokio::test]
async fn test_api_error_carries_status_message_endpoint_and_request_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/v1/pages/{}", PAGE_ID)))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "object": "error",
            "status": 404,
            "code": "object_not_found",
            "message": "Could not find page with ID.",
            "request_id": "req-123"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).get_page(PAGE_ID).await.unwrap_err();
    match err {
        McpError::Api {
            status,
            message,
            endpoint,
            request_id,
        } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Could not find page with ID.");
            assert_eq!(endpoint, format!("/v1/pages/{}", PAGE_ID));
            assert_eq!(request_id.as_deref(), Some("req-123"));
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_non_json_error_body_is_used_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/search"))
        .respond_with(
            ResponseTemplate::new(502)
                .set_body_string("upstream unavailable")
                .insert_header("x-request-id", "hdr-9"),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .search(&SearchParams::default())
        .await
        .unwrap_err();
    let text = err.to_string();
    assert!(text.contains("502"));
    assert!(text.contains("upstream unavailable"));
    assert!(text.contains("/v1/search"));
    assert!(text.contains("hdr-9"));
}

#[tokio::test]
async fn test_empty_error_body_uses_reason_phrase() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/v1/pages/{}", PAGE_ID)))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client_for(&server).get_page(PAGE_ID).await.unwrap_err();
    assert!(matches!(err, McpError::Api { status: 404, ref message, .. } if message == "Not Found"));
}

#[tokio::test]
async fn test_errors_are_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/users"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "object": "error", "status": 429, "message": "Rate limited"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .list_users(&Pagination::default())
        .await
        .unwrap_err();
    assert!(matches!(err, McpError::Api { status: 429, .. }));
}

#[tokio::test]
async fn test_invalid_id_issues_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server).get_block("not-a-valid-id").await.unwrap_err();
    assert!(matches!(err, McpError::InvalidId(ref raw) if raw == "not-a-valid-id"));
}

#[tokio::test]
async fn test_malformed_success_body_is_a_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).get_me().await.unwrap_err();
    assert!(matches!(err, McpError::Decode { .. }));
}

#[tokio::test]
async fn test_transport_failure_is_wrapped() {
    // Nothing listens on port 9 (discard) in the test environment.
    let config = ClientConfig::new("t")
        .unwrap()
        .with_base_url(Url::parse("http://127.0.0.1:9").unwrap());
    let err = NotionClient::new(config).get_me().await.unwrap_err();
    assert!(matches!(err, McpError::Transport(_)));
    assert!(err.to_string().starts_with("Request to Notion API failed"));
}
