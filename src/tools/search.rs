//! Search tools.
//!
//! Tools: search, get-all-pages
//!
//! `get-all-pages` is a search restricted to pages with no query text. Its
//! output starts with a count summary line ahead of the JSON payload.

use serde_json::{Map, Value as JsonValue};

use crate::client::NotionClient;
use crate::convert::{get_optional_string, get_pagination, json_to_text, MAX_PAGE_SIZE};
use crate::error::{McpError, Result};
use crate::schema;
use crate::tools::ToolDef;
use crate::types::{SearchFilter, SearchObject, SearchParams, SearchSort, SortDirection};

/// Get all search tool definitions.
pub fn tools() -> Vec<ToolDef> {
    vec![
        ToolDef::new(
            "search",
            "searching Notion",
            "Search pages and databases shared with the integration by title. Optionally \
             restrict to one object type and sort by last edited time (descending unless \
             sort_direction says otherwise).",
            schema!(object {
                optional: {
                    "query": string => "Text to match against titles",
                    "filter_object": ["page", "database"] => "Only return this object type",
                    "sort_timestamp": ["last_edited_time"] => "Timestamp to sort by",
                    "sort_direction": ["ascending", "descending"] => "Sort direction, default descending",
                    "start_cursor": string => "Cursor from a previous response",
                    "page_size": page_size => "Number of results to return (1-100)"
                }
            }),
        ),
        ToolDef::new(
            "get-all-pages",
            "retrieving pages",
            "List pages shared with the integration. Returns a summary line followed by \
             the raw search response. Defaults to 100 pages per call; pass next_cursor as \
             start_cursor to continue.",
            schema!(object {
                optional: {
                    "start_cursor": string => "Cursor from a previous response",
                    "page_size": page_size => "Number of pages to return (1-100, default 100)"
                }
            }),
        ),
    ]
}

/// Dispatch a search tool call.
pub async fn dispatch(
    client: &NotionClient,
    name: &str,
    args: Map<String, JsonValue>,
) -> Result<String> {
    match name {
        "search" => {
            let params = build_search(&args)?;
            let response = client.search(&params).await?;
            json_to_text(&response)
        }
        "get-all-pages" => {
            let params = build_all_pages(&args)?;
            let response = client.search(&params).await?;
            Ok(format!(
                "{}\n\n{}",
                page_summary(&response),
                json_to_text(&response)?
            ))
        }
        _ => Err(McpError::UnknownTool(name.to_string())),
    }
}

/// Shape `search` arguments.
pub fn build_search(args: &Map<String, JsonValue>) -> Result<SearchParams> {
    let filter = match get_optional_string(args, "filter_object")?.as_deref() {
        None => None,
        Some("page") => Some(SearchFilter::object(SearchObject::Page)),
        Some("database") => Some(SearchFilter::object(SearchObject::Database)),
        Some(other) => {
            return Err(McpError::InvalidArg {
                name: "filter_object".to_string(),
                reason: format!("Unknown object type '{}'. Use: page or database.", other),
            })
        }
    };

    let direction = match get_optional_string(args, "sort_direction")?.as_deref() {
        None => SortDirection::default(),
        Some("ascending") => SortDirection::Ascending,
        Some("descending") => SortDirection::Descending,
        Some(other) => {
            return Err(McpError::InvalidArg {
                name: "sort_direction".to_string(),
                reason: format!(
                    "Unknown direction '{}'. Use: ascending or descending.",
                    other
                ),
            })
        }
    };
    let sort = get_optional_string(args, "sort_timestamp")?
        .map(|timestamp| SearchSort { timestamp, direction });

    Ok(SearchParams {
        query: get_optional_string(args, "query")?,
        filter,
        sort,
        pagination: get_pagination(args)?,
    })
}

/// Shape `get-all-pages` arguments: page filter, no query, 100 per page by default.
pub fn build_all_pages(args: &Map<String, JsonValue>) -> Result<SearchParams> {
    let mut pagination = get_pagination(args)?;
    pagination.page_size.get_or_insert(MAX_PAGE_SIZE as u32);

    Ok(SearchParams {
        query: None,
        filter: Some(SearchFilter::object(SearchObject::Page)),
        sort: None,
        pagination,
    })
}

/// `Found N pages. More|No more pages available.`
pub fn page_summary(response: &JsonValue) -> String {
    let count = response
        .get("results")
        .and_then(|r| r.as_array())
        .map_or(0, |r| r.len());
    let more = response
        .get("has_more")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);
    format!(
        "Found {} pages. {} pages available.",
        count,
        if more { "More" } else { "No more" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: JsonValue) -> Map<String, JsonValue> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn all_pages_defaults() {
        let params = build_all_pages(&Map::new()).unwrap();
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({
                "filter": { "property": "object", "value": "page" },
                "page_size": 100
            })
        );
    }

    #[test]
    fn all_pages_keeps_cursor_and_size() {
        let params =
            build_all_pages(&args(json!({ "start_cursor": "abc", "page_size": 5 }))).unwrap();
        assert_eq!(params.pagination.page_size, Some(5));
        assert_eq!(params.pagination.start_cursor.as_deref(), Some("abc"));
        assert!(params.query.is_none());
    }

    #[test]
    fn sort_direction_defaults_to_descending() {
        let params = build_search(&args(json!({ "sort_timestamp": "last_edited_time" }))).unwrap();
        assert_eq!(
            serde_json::to_value(&params).unwrap()["sort"],
            json!({ "timestamp": "last_edited_time", "direction": "descending" })
        );
    }

    #[test]
    fn direction_without_timestamp_sends_no_sort() {
        let params = build_search(&args(json!({ "sort_direction": "ascending" }))).unwrap();
        assert!(params.sort.is_none());
    }

    #[test]
    fn search_with_everything() {
        let params = build_search(&args(json!({
            "query": "roadmap",
            "filter_object": "database",
            "sort_timestamp": "last_edited_time",
            "sort_direction": "ascending",
            "page_size": 10
        })))
        .unwrap();
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({
                "query": "roadmap",
                "filter": { "property": "object", "value": "database" },
                "sort": { "timestamp": "last_edited_time", "direction": "ascending" },
                "page_size": 10
            })
        );
    }

    #[test]
    fn wrong_typed_query_is_rejected() {
        let err = build_search(&args(json!({ "query": 5 }))).unwrap_err();
        assert!(matches!(err, McpError::InvalidArg { ref name, .. } if name == "query"));
    }

    #[test]
    fn unknown_filter_is_rejected() {
        let err = build_search(&args(json!({ "filter_object": "block" }))).unwrap_err();
        assert!(err.to_string().contains("filter_object"));
    }

    #[test]
    fn summary_reports_count_and_more() {
        let response = json!({ "results": [{}, {}, {}], "has_more": true });
        assert_eq!(
            page_summary(&response),
            "Found 3 pages. More pages available."
        );
        let response = json!({ "results": [], "has_more": false });
        assert_eq!(
            page_summary(&response),
            "Found 0 pages. No more pages available."
        );
    }
}
