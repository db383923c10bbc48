//! Comment tools.
//!
//! Tools: list-comments, create-comment
//!
//! The client can also comment on blocks and reply in discussions; the tool
//! surface only starts plain-text comments on pages.

use serde_json::{Map, Value as JsonValue};

use crate::client::NotionClient;
use crate::convert::{get_pagination, get_string_arg, json_to_text, rich_text};
use crate::error::{McpError, Result};
use crate::schema;
use crate::tools::ToolDef;
use crate::types::{CommentTarget, CreateCommentParams, Parent};

/// Get all comment tool definitions.
pub fn tools() -> Vec<ToolDef> {
    vec![
        ToolDef::new(
            "list-comments",
            "listing comments",
            "List unresolved comments on a page or block. Paginated with start_cursor and \
             page_size.",
            schema!(object {
                required: { "block_id": string => "ID of the page or block" },
                optional: {
                    "start_cursor": string => "Cursor from a previous response",
                    "page_size": page_size => "Number of comments to return (1-100)"
                }
            }),
        ),
        ToolDef::new(
            "create-comment",
            "creating comment",
            "Add a plain-text comment to a page.",
            schema!(object {
                required: {
                    "page_id": string => "ID of the page",
                    "text": string => "Comment text"
                }
            }),
        ),
    ]
}

/// Dispatch a comment tool call.
pub async fn dispatch(
    client: &NotionClient,
    name: &str,
    args: Map<String, JsonValue>,
) -> Result<String> {
    let response = match name {
        "list-comments" => {
            let block_id = get_string_arg(&args, "block_id")?;
            let pagination = get_pagination(&args)?;
            client.list_comments(&block_id, &pagination).await?
        }
        "create-comment" => {
            let params = build_create_comment(&args)?;
            client.create_comment(&params).await?
        }
        _ => return Err(McpError::UnknownTool(name.to_string())),
    };
    json_to_text(&response)
}

/// Shape `create-comment` arguments: always a page parent.
pub fn build_create_comment(args: &Map<String, JsonValue>) -> Result<CreateCommentParams> {
    let page_id = get_string_arg(args, "page_id")?;
    let text = get_string_arg(args, "text")?;
    Ok(CreateCommentParams {
        target: CommentTarget::Parent(Parent::PageId(page_id)),
        rich_text: rich_text(&text),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn comment_targets_page() {
        let args = json!({ "page_id": "p1", "text": "Looks good" });
        let params = build_create_comment(args.as_object().unwrap()).unwrap();
        assert_eq!(
            params.to_body(),
            json!({
                "parent": { "page_id": "p1" },
                "rich_text": [{ "type": "text", "text": { "content": "Looks good" } }]
            })
        );
    }
}
