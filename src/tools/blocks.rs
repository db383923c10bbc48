//! Block tools.
//!
//! Tools: get-block, get-block-children, append-block-children, delete-block

use serde_json::{Map, Value as JsonValue};

use crate::client::NotionClient;
use crate::convert::{get_pagination, get_string_arg, json_to_text, paragraph_block};
use crate::error::{McpError, Result};
use crate::schema;
use crate::tools::ToolDef;

/// Get all block tool definitions.
pub fn tools() -> Vec<ToolDef> {
    vec![
        ToolDef::new(
            "get-block",
            "retrieving block",
            "Retrieve a single block by ID.",
            schema!(object {
                required: { "block_id": string => "ID of the block" }
            }),
        ),
        ToolDef::new(
            "get-block-children",
            "retrieving block children",
            "List the child blocks of a block or page. Pass a page ID to read the page's \
             content. Paginated with start_cursor and page_size.",
            schema!(object {
                required: { "block_id": string => "ID of the parent block or page" },
                optional: {
                    "start_cursor": string => "Cursor from a previous response",
                    "page_size": page_size => "Number of blocks to return (1-100)"
                }
            }),
        ),
        ToolDef::new(
            "append-block-children",
            "appending block children",
            "Append one paragraph of plain text to the end of a block or page.",
            schema!(object {
                required: {
                    "block_id": string => "ID of the parent block or page",
                    "content": string => "Plain text of the new paragraph"
                }
            }),
        ),
        ToolDef::new(
            "delete-block",
            "deleting block",
            "Move a block to the trash. Pages can be deleted the same way.",
            schema!(object {
                required: { "block_id": string => "ID of the block" }
            }),
        ),
    ]
}

/// Dispatch a block tool call.
pub async fn dispatch(
    client: &NotionClient,
    name: &str,
    args: Map<String, JsonValue>,
) -> Result<String> {
    let response = match name {
        "get-block" => {
            let block_id = get_string_arg(&args, "block_id")?;
            client.get_block(&block_id).await?
        }
        "get-block-children" => {
            let block_id = get_string_arg(&args, "block_id")?;
            let pagination = get_pagination(&args)?;
            client.get_block_children(&block_id, &pagination).await?
        }
        "append-block-children" => {
            let block_id = get_string_arg(&args, "block_id")?;
            let children = build_append_children(&args)?;
            client.append_block_children(&block_id, children).await?
        }
        "delete-block" => {
            let block_id = get_string_arg(&args, "block_id")?;
            client.delete_block(&block_id).await?
        }
        _ => return Err(McpError::UnknownTool(name.to_string())),
    };
    json_to_text(&response)
}

/// Shape `append-block-children` arguments: always exactly one paragraph.
pub fn build_append_children(args: &Map<String, JsonValue>) -> Result<Vec<JsonValue>> {
    let content = get_string_arg(args, "content")?;
    Ok(vec![paragraph_block(&content)])
}
