//! Conversion utilities between flat tool arguments and Notion JSON shapes.
//!
//! Argument helpers read from the `arguments` map of a `tools/call` request.
//! Builders produce the small Notion objects the tools synthesize: rich text,
//! paragraph blocks, and title properties.

use serde_json::{json, Map, Value as JsonValue};

use crate::error::{McpError, Result};
use crate::types::Pagination;

/// Largest page size the Notion API accepts.
pub const MAX_PAGE_SIZE: u64 = 100;

/// A single plain-text rich text array: `[{type: "text", text: {content}}]`.
pub fn rich_text(content: &str) -> Vec<JsonValue> {
    vec![json!({
        "type": "text",
        "text": { "content": content }
    })]
}

/// One paragraph block holding `content` as plain text.
pub fn paragraph_block(content: &str) -> JsonValue {
    json!({
        "object": "block",
        "type": "paragraph",
        "paragraph": { "rich_text": rich_text(content) }
    })
}

/// Value of a title property: `{"title": [rich text]}`.
pub fn title_property(title: &str) -> JsonValue {
    json!({ "title": rich_text(title) })
}

/// Render a response body as the text of a tool result.
pub fn json_to_text(value: &JsonValue) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(McpError::from)
}

/// Helper to get a required string argument from JSON arguments.
pub fn get_string_arg(args: &Map<String, JsonValue>, name: &str) -> Result<String> {
    args.get(name)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| McpError::MissingArg(name.to_string()))
}

/// Helper to get an optional string argument from JSON arguments.
///
/// Absent or `null` yields `None`; a value of any other type is rejected.
pub fn get_optional_string(args: &Map<String, JsonValue>, name: &str) -> Result<Option<String>> {
    match args.get(name) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(McpError::InvalidArg {
            name: name.to_string(),
            reason: "Expected a string".to_string(),
        }),
    }
}

/// Helper to get an optional boolean argument.
pub fn get_optional_bool(args: &Map<String, JsonValue>, name: &str) -> Result<Option<bool>> {
    match args.get(name) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(McpError::InvalidArg {
            name: name.to_string(),
            reason: "Expected a boolean".to_string(),
        }),
    }
}

/// Helper to get an optional JSON object argument.
///
/// Absent or `null` yields `None`; any other non-object is rejected.
pub fn get_optional_object(
    args: &Map<String, JsonValue>,
    name: &str,
) -> Result<Option<Map<String, JsonValue>>> {
    match args.get(name) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::Object(map)) => Ok(Some(map.clone())),
        Some(_) => Err(McpError::InvalidArg {
            name: name.to_string(),
            reason: "Expected an object".to_string(),
        }),
    }
}

/// Helper to get an optional array of JSON objects.
pub fn get_optional_object_array(
    args: &Map<String, JsonValue>,
    name: &str,
) -> Result<Option<Vec<JsonValue>>> {
    match args.get(name) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::Array(items)) if items.iter().all(JsonValue::is_object) => {
            Ok(Some(items.clone()))
        }
        Some(_) => Err(McpError::InvalidArg {
            name: name.to_string(),
            reason: "Expected an array of objects".to_string(),
        }),
    }
}

/// Helper to read `start_cursor` and a bounded `page_size`.
pub fn get_pagination(args: &Map<String, JsonValue>) -> Result<Pagination> {
    let page_size = match args.get("page_size") {
        None | Some(JsonValue::Null) => None,
        Some(v) => match v.as_u64() {
            Some(n) if (1..=MAX_PAGE_SIZE).contains(&n) => Some(n as u32),
            _ => {
                return Err(McpError::InvalidArg {
                    name: "page_size".to_string(),
                    reason: format!("Expected an integer between 1 and {}", MAX_PAGE_SIZE),
                })
            }
        },
    };

    Ok(Pagination {
        start_cursor: get_optional_string(args, "start_cursor")?,
        page_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(value: JsonValue) -> Map<String, JsonValue> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn paragraph_block_wraps_plain_text() {
        let block = paragraph_block("hello");
        assert_eq!(block["type"], "paragraph");
        assert_eq!(
            block["paragraph"]["rich_text"],
            json!([{ "type": "text", "text": { "content": "hello" } }])
        );
    }

    #[test]
    fn missing_string_arg_is_named() {
        let err = get_string_arg(&Map::new(), "page_id").unwrap_err();
        assert_eq!(err.to_string(), "Missing required argument: page_id");
    }

    #[test]
    fn pagination_accepts_bounds() {
        let p = get_pagination(&args(json!({ "page_size": 100, "start_cursor": "c" }))).unwrap();
        assert_eq!(p.page_size, Some(100));
        assert_eq!(p.start_cursor.as_deref(), Some("c"));

        let p = get_pagination(&args(json!({ "page_size": 1 }))).unwrap();
        assert_eq!(p.page_size, Some(1));
    }

    #[test]
    fn pagination_rejects_out_of_range() {
        assert!(get_pagination(&args(json!({ "page_size": 0 }))).is_err());
        assert!(get_pagination(&args(json!({ "page_size": 101 }))).is_err());
        assert!(get_pagination(&args(json!({ "page_size": "ten" }))).is_err());
    }

    #[test]
    fn optional_string_rejects_other_types() {
        assert_eq!(
            get_optional_string(&args(json!({ "q": "x" })), "q").unwrap(),
            Some("x".to_string())
        );
        assert!(get_optional_string(&args(json!({ "q": null })), "q")
            .unwrap()
            .is_none());
        let err = get_optional_string(&args(json!({ "q": 5 })), "q").unwrap_err();
        assert!(matches!(err, McpError::InvalidArg { ref name, .. } if name == "q"));
        assert!(get_optional_string(&args(json!({ "q": ["x"] })), "q").is_err());
    }

    #[test]
    fn optional_bool_rejects_other_types() {
        assert_eq!(
            get_optional_bool(&args(json!({ "b": false })), "b").unwrap(),
            Some(false)
        );
        assert!(get_optional_bool(&args(json!({ "b": "true" })), "b").is_err());
    }

    #[test]
    fn pagination_rejects_non_string_cursor() {
        assert!(get_pagination(&args(json!({ "start_cursor": 3 }))).is_err());
    }

    #[test]
    fn optional_object_rejects_non_objects() {
        assert!(get_optional_object(&args(json!({ "p": null })), "p")
            .unwrap()
            .is_none());
        assert!(get_optional_object(&args(json!({ "p": [1] })), "p").is_err());
    }

    #[test]
    fn optional_object_array_requires_objects() {
        let ok = get_optional_object_array(&args(json!({ "s": [{ "a": 1 }] })), "s").unwrap();
        assert_eq!(ok.map(|v| v.len()), Some(1));
        assert!(get_optional_object_array(&args(json!({ "s": [1] })), "s").is_err());
    }
}
