//! Notion API client.
//!
//! Single point of contact with the remote API. Every call validates its
//! identifiers before any I/O, sends exactly one request with the same
//! authentication and version headers, and returns the parsed body as-is.

use reqwest::{Client, Method, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::{debug, warn};
use url::Url;

use crate::error::{McpError, Result};
use crate::ids::normalize_id;
use crate::types::{
    CommentTarget, CreateCommentParams, CreateDatabaseParams, CreatePageParams, Pagination,
    QueryDatabaseParams, SearchParams, UpdatePageParams,
};

/// Default API host.
pub const DEFAULT_BASE_URL: &str = "https://api.notion.com";

/// Value of the `Notion-Version` header sent with every request.
pub const NOTION_VERSION: &str = "2022-06-28";

/// Credential and endpoint for a [`NotionClient`].
pub struct ClientConfig {
    /// Integration token, sent as a bearer credential
    pub token: SecretString,
    /// API host, normally [`DEFAULT_BASE_URL`]
    pub base_url: Url,
}

impl ClientConfig {
    /// Config pointing at the public Notion API.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let base_url = Url::parse(DEFAULT_BASE_URL)
            .map_err(|e| McpError::Config(format!("invalid base URL: {}", e)))?;
        Ok(Self {
            token: SecretString::from(token.into()),
            base_url: with_trailing_slash(base_url),
        })
    }

    /// Override the API host (used for tests and proxies). A path prefix such
    /// as `https://proxy.example/notion` is kept in front of every endpoint.
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = with_trailing_slash(base_url);
        self
    }
}

/// `Url::join` replaces the last path segment unless the base ends in `/`.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

/// Async client for the Notion REST API.
pub struct NotionClient {
    http: Client,
    config: ClientConfig,
}

impl NotionClient {
    /// Create a client. The credential and base URL are fixed for its lifetime.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &Url {
        &self.config.base_url
    }

    // ── Users ────────────────────────────────────────────────────────────

    /// `GET /v1/users/me`: the bot user behind the token.
    pub async fn get_me(&self) -> Result<JsonValue> {
        self.get("/v1/users/me", &[]).await
    }

    /// `GET /v1/users`
    pub async fn list_users(&self, pagination: &Pagination) -> Result<JsonValue> {
        self.get("/v1/users", &pagination.query_pairs()).await
    }

    /// `GET /v1/users/{id}`
    pub async fn get_user(&self, user_id: &str) -> Result<JsonValue> {
        let id = normalize_id(user_id)?;
        self.get(&format!("/v1/users/{}", id), &[]).await
    }

    // ── Search ───────────────────────────────────────────────────────────

    /// `POST /v1/search`
    pub async fn search(&self, params: &SearchParams) -> Result<JsonValue> {
        self.send(Method::POST, "/v1/search", &[], Some(params)).await
    }

    // ── Pages ────────────────────────────────────────────────────────────

    /// `GET /v1/pages/{id}`
    pub async fn get_page(&self, page_id: &str) -> Result<JsonValue> {
        let id = normalize_id(page_id)?;
        self.get(&format!("/v1/pages/{}", id), &[]).await
    }

    /// `POST /v1/pages` under a page or database parent.
    pub async fn create_page(&self, params: &CreatePageParams) -> Result<JsonValue> {
        let parent_id = normalize_id(params.parent.id())?;
        let params = CreatePageParams {
            parent: params.parent.with_id(parent_id),
            ..params.clone()
        };
        self.send(Method::POST, "/v1/pages", &[], Some(&params)).await
    }

    /// `PATCH /v1/pages/{id}`: properties, archival, icon, cover.
    pub async fn update_page(&self, page_id: &str, params: &UpdatePageParams) -> Result<JsonValue> {
        let id = normalize_id(page_id)?;
        self.send(Method::PATCH, &format!("/v1/pages/{}", id), &[], Some(params))
            .await
    }

    // ── Databases ────────────────────────────────────────────────────────

    /// `GET /v1/databases/{id}`
    pub async fn get_database(&self, database_id: &str) -> Result<JsonValue> {
        let id = normalize_id(database_id)?;
        self.get(&format!("/v1/databases/{}", id), &[]).await
    }

    /// `POST /v1/databases` under a parent page.
    pub async fn create_database(&self, params: &CreateDatabaseParams) -> Result<JsonValue> {
        let parent_id = normalize_id(params.parent.id())?;
        let params = CreateDatabaseParams {
            parent: params.parent.with_id(parent_id),
            ..params.clone()
        };
        self.send(Method::POST, "/v1/databases", &[], Some(&params))
            .await
    }

    /// `POST /v1/databases/{id}/query`
    pub async fn query_database(
        &self,
        database_id: &str,
        params: &QueryDatabaseParams,
    ) -> Result<JsonValue> {
        let id = normalize_id(database_id)?;
        self.send(
            Method::POST,
            &format!("/v1/databases/{}/query", id),
            &[],
            Some(params),
        )
        .await
    }

    // ── Blocks ───────────────────────────────────────────────────────────

    /// `GET /v1/blocks/{id}`
    pub async fn get_block(&self, block_id: &str) -> Result<JsonValue> {
        let id = normalize_id(block_id)?;
        self.get(&format!("/v1/blocks/{}", id), &[]).await
    }

    /// `GET /v1/blocks/{id}/children`
    pub async fn get_block_children(
        &self,
        block_id: &str,
        pagination: &Pagination,
    ) -> Result<JsonValue> {
        let id = normalize_id(block_id)?;
        self.get(
            &format!("/v1/blocks/{}/children", id),
            &pagination.query_pairs(),
        )
        .await
    }

    /// `PATCH /v1/blocks/{id}/children` with any sequence of block objects.
    pub async fn append_block_children(
        &self,
        block_id: &str,
        children: Vec<JsonValue>,
    ) -> Result<JsonValue> {
        let id = normalize_id(block_id)?;
        let body = serde_json::json!({ "children": children });
        self.send(
            Method::PATCH,
            &format!("/v1/blocks/{}/children", id),
            &[],
            Some(&body),
        )
        .await
    }

    /// `DELETE /v1/blocks/{id}`: moves the block to trash.
    pub async fn delete_block(&self, block_id: &str) -> Result<JsonValue> {
        let id = normalize_id(block_id)?;
        self.send::<JsonValue>(Method::DELETE, &format!("/v1/blocks/{}", id), &[], None)
            .await
    }

    // ── Comments ─────────────────────────────────────────────────────────

    /// `GET /v1/comments?block_id=...` for a page or block.
    pub async fn list_comments(&self, block_id: &str, pagination: &Pagination) -> Result<JsonValue> {
        let id = normalize_id(block_id)?;
        let mut query = vec![("block_id", id)];
        query.extend(pagination.query_pairs());
        self.get("/v1/comments", &query).await
    }

    /// `POST /v1/comments` on a page, a block, or inside a discussion.
    pub async fn create_comment(&self, params: &CreateCommentParams) -> Result<JsonValue> {
        let params = match &params.target {
            CommentTarget::Parent(parent) => CreateCommentParams {
                target: CommentTarget::Parent(parent.with_id(normalize_id(parent.id())?)),
                rich_text: params.rich_text.clone(),
            },
            CommentTarget::Discussion(_) => params.clone(),
        };
        self.send(Method::POST, "/v1/comments", &[], Some(&params.to_body()))
            .await
    }

    // ── Transport ────────────────────────────────────────────────────────

    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<JsonValue> {
        self.send::<JsonValue>(Method::GET, path, query, None).await
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<JsonValue> {
        // Endpoints are joined relative so a base path prefix survives.
        let url = self
            .config
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| McpError::Config(format!("invalid request path {}: {}", path, e)))?;

        debug!(%method, path, "notion request");

        let mut request = self
            .http
            .request(method, url)
            .bearer_auth(self.config.token.expose_secret())
            .header("Notion-Version", NOTION_VERSION)
            .header("Accept", "application/json")
            .header("Content-Type", "application/json");
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        Self::read_response(path, response).await
    }

    async fn read_response(path: &str, response: Response) -> Result<JsonValue> {
        let status = response.status();
        let header_request_id = response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let text = response.text().await?;

        if status.is_success() {
            return serde_json::from_str(&text).map_err(|e| McpError::Decode {
                endpoint: path.to_string(),
                reason: e.to_string(),
            });
        }

        let err = api_error(status.as_u16(), path, &text, header_request_id);
        warn!(status = status.as_u16(), path, "notion api rejected request");
        Err(err)
    }
}

/// Build an [`McpError::Api`] from a non-success response body.
///
/// Uses the body's `message` and `request_id` when it is a Notion error
/// object; otherwise the raw body is the message and the header id is used.
/// A blank body falls back to the status' reason phrase.
pub(crate) fn api_error(
    status: u16,
    endpoint: &str,
    body: &str,
    header_request_id: Option<String>,
) -> McpError {
    let parsed: Option<JsonValue> = serde_json::from_str(body).ok();
    let field = |name: &str| {
        parsed
            .as_ref()
            .and_then(|v| v.get(name))
            .and_then(|v| v.as_str())
            .map(str::to_string)
    };

    let message = field("message").unwrap_or_else(|| {
        if body.trim().is_empty() {
            reqwest::StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .map(str::to_string)
                .unwrap_or_else(|| format!("HTTP {}", status))
        } else {
            body.to_string()
        }
    });

    McpError::Api {
        status,
        message,
        endpoint: endpoint.to_string(),
        request_id: field("request_id").or(header_request_id),
    }
}
