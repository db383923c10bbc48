//! Typed inputs for [`NotionClient`](crate::NotionClient) calls.
//!
//! Request bodies are serialized straight from these types. Response bodies are
//! not modelled: the client hands back `serde_json::Value` so unknown fields
//! pass through untouched.

use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

/// Containing entity of a new page, database, or comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Parent {
    /// `{"page_id": ...}`
    PageId(String),
    /// `{"database_id": ...}`
    DatabaseId(String),
    /// `{"block_id": ...}`
    BlockId(String),
}

impl Parent {
    /// The raw identifier, whichever kind of parent this is.
    pub fn id(&self) -> &str {
        match self {
            Parent::PageId(id) | Parent::DatabaseId(id) | Parent::BlockId(id) => id,
        }
    }

    /// Wire key for this parent kind.
    pub fn key(&self) -> &'static str {
        match self {
            Parent::PageId(_) => "page_id",
            Parent::DatabaseId(_) => "database_id",
            Parent::BlockId(_) => "block_id",
        }
    }

    pub(crate) fn with_id(&self, id: String) -> Self {
        match self {
            Parent::PageId(_) => Parent::PageId(id),
            Parent::DatabaseId(_) => Parent::DatabaseId(id),
            Parent::BlockId(_) => Parent::BlockId(id),
        }
    }
}

/// Cursor-based pagination shared by list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Pagination {
    /// Opaque cursor from a previous response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
    /// Items per page, 1 to 100
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl Pagination {
    /// Query-string pairs for GET list endpoints.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(cursor) = &self.start_cursor {
            pairs.push(("start_cursor", cursor.clone()));
        }
        if let Some(size) = self.page_size {
            pairs.push(("page_size", size.to_string()));
        }
        pairs
    }
}

/// Object-type filter for search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchObject {
    /// Pages only
    Page,
    /// Databases only
    Database,
}

/// Sort direction for search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Oldest first
    Ascending,
    /// Newest first
    #[default]
    Descending,
}

/// `{"property": "object", "value": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchFilter {
    /// Always `object`
    pub property: &'static str,
    /// Object type to keep
    pub value: SearchObject,
}

impl SearchFilter {
    /// Filter on the `object` property.
    pub fn object(value: SearchObject) -> Self {
        Self {
            property: "object",
            value,
        }
    }
}

/// `{"timestamp": ..., "direction": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchSort {
    /// Timestamp field, e.g. `last_edited_time`
    pub timestamp: String,
    /// Sort direction
    pub direction: SortDirection,
}

/// Body of `POST /v1/search`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchParams {
    /// Free-text query
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Object-type filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<SearchFilter>,
    /// Sort order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SearchSort>,
    /// Cursor and page size
    #[serde(flatten)]
    pub pagination: Pagination,
}

/// Body of `POST /v1/pages`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatePageParams {
    /// Containing entity
    pub parent: Parent,
    /// Property values or schema
    pub properties: Map<String, JsonValue>,
    /// Initial block content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<JsonValue>>,
    /// Icon object
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<JsonValue>,
    /// Cover object
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<JsonValue>,
}

/// Body of `PATCH /v1/pages/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdatePageParams {
    /// Property values to change
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Map<String, JsonValue>>,
    /// Archive or restore
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    /// Icon object
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<JsonValue>,
    /// Cover object
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<JsonValue>,
}

impl UpdatePageParams {
    /// True when no field would be sent.
    pub fn is_empty(&self) -> bool {
        self.properties.is_none()
            && self.archived.is_none()
            && self.icon.is_none()
            && self.cover.is_none()
    }
}

/// Body of `POST /v1/databases`. The parent is always a page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateDatabaseParams {
    /// Containing entity
    pub parent: Parent,
    /// Title rich text
    pub title: Vec<JsonValue>,
    /// Property values or schema
    pub properties: Map<String, JsonValue>,
}

/// Body of `POST /v1/databases/{id}/query`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryDatabaseParams {
    /// Notion filter object
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<JsonValue>,
    /// Notion sort objects
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sorts: Option<Vec<JsonValue>>,
    /// Cursor and page size
    #[serde(flatten)]
    pub pagination: Pagination,
}

/// Where a comment lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentTarget {
    /// Start a new discussion on a page or block.
    Parent(Parent),
    /// Reply inside an existing discussion thread.
    Discussion(String),
}

/// Body of `POST /v1/comments`.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateCommentParams {
    /// Page, block, or discussion
    pub target: CommentTarget,
    /// Comment body
    pub rich_text: Vec<JsonValue>,
}

impl CreateCommentParams {
    /// Serialize to the wire shape: either `parent` or `discussion_id`.
    pub fn to_body(&self) -> JsonValue {
        let mut body = Map::new();
        match &self.target {
            CommentTarget::Parent(parent) => {
                let mut parent_obj = Map::new();
                parent_obj.insert(
                    parent.key().to_string(),
                    JsonValue::String(parent.id().to_string()),
                );
                body.insert("parent".to_string(), JsonValue::Object(parent_obj));
            }
            CommentTarget::Discussion(id) => {
                body.insert("discussion_id".to_string(), JsonValue::String(id.clone()));
            }
        }
        body.insert(
            "rich_text".to_string(),
            JsonValue::Array(self.rich_text.clone()),
        );
        JsonValue::Object(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parent_serializes_externally_tagged() {
        let parent = Parent::DatabaseId("abc".to_string());
        assert_eq!(
            serde_json::to_value(&parent).unwrap(),
            json!({ "database_id": "abc" })
        );
    }

    #[test]
    fn search_params_flatten_pagination_and_skip_empty() {
        let params = SearchParams {
            filter: Some(SearchFilter::object(SearchObject::Page)),
            pagination: Pagination {
                start_cursor: None,
                page_size: Some(100),
            },
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({
                "filter": { "property": "object", "value": "page" },
                "page_size": 100
            })
        );
    }

    #[test]
    fn comment_in_discussion_omits_parent() {
        let params = CreateCommentParams {
            target: CommentTarget::Discussion("d1".to_string()),
            rich_text: vec![json!({ "type": "text", "text": { "content": "hi" } })],
        };
        let body = params.to_body();
        assert_eq!(body["discussion_id"], "d1");
        assert!(body.get("parent").is_none());
    }
}
