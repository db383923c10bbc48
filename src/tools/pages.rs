//! Page tools.
//!
//! Tools: get-page, create-page, update-page
//!
//! Title synthesis for `create-page`:
//! - database parent: caller `properties` are kept; a `Name` title property is
//!   added from `title` only when `properties` has no `Name` key.
//! - page parent: properties are always just `title`, built from `title`.

use serde_json::{json, Map, Value as JsonValue};

use crate::client::NotionClient;
use crate::convert::{
    get_optional_bool, get_optional_object, get_optional_string, get_string_arg, json_to_text,
    paragraph_block, title_property,
};
use crate::error::{McpError, Result};
use crate::schema;
use crate::tools::ToolDef;
use crate::types::{CreatePageParams, Parent, UpdatePageParams};

/// Get all page tool definitions.
pub fn tools() -> Vec<ToolDef> {
    vec![
        ToolDef::new(
            "get-page",
            "retrieving page",
            "Retrieve a page's properties and metadata by ID. Does not include the page \
             content; use get-block-children with the page ID for that.",
            schema!(object {
                required: { "page_id": string => "ID of the page" }
            }),
        ),
        ToolDef::new(
            "create-page",
            "creating page",
            "Create a page under a parent page or database. Under a database, properties \
             must match the database schema; a Name title is filled from title when \
             properties has no Name. Under a page, only the title is set. Optional content \
             becomes a single paragraph.",
            schema!(object {
                required: {
                    "parent_type": ["page", "database"] => "Kind of parent",
                    "parent_id": string => "ID of the parent page or database",
                    "title": string => "Page title"
                },
                optional: {
                    "properties": object => "Property values (database parents only)",
                    "content": string => "Plain text for the first paragraph",
                    "icon_emoji": string => "Emoji to use as the page icon",
                    "cover_url": string => "External image URL for the page cover"
                }
            }),
        ),
        ToolDef::new(
            "update-page",
            "updating page",
            "Update a page's properties, icon, or cover, or archive/restore it. Only the \
             supplied fields change.",
            schema!(object {
                required: { "page_id": string => "ID of the page" },
                optional: {
                    "properties": object => "Property values to set",
                    "archived": boolean => "true to archive, false to restore",
                    "icon_emoji": string => "Emoji to use as the page icon",
                    "cover_url": string => "External image URL for the page cover"
                }
            }),
        ),
    ]
}

/// Dispatch a page tool call.
pub async fn dispatch(
    client: &NotionClient,
    name: &str,
    args: Map<String, JsonValue>,
) -> Result<String> {
    let response = match name {
        "get-page" => {
            let page_id = get_string_arg(&args, "page_id")?;
            client.get_page(&page_id).await?
        }
        "create-page" => {
            let params = build_create_page(&args)?;
            client.create_page(&params).await?
        }
        "update-page" => {
            let page_id = get_string_arg(&args, "page_id")?;
            let params = build_update_page(&args)?;
            client.update_page(&page_id, &params).await?
        }
        _ => return Err(McpError::UnknownTool(name.to_string())),
    };
    json_to_text(&response)
}

/// Shape `create-page` arguments.
pub fn build_create_page(args: &Map<String, JsonValue>) -> Result<CreatePageParams> {
    let parent_type = get_string_arg(args, "parent_type")?;
    let parent_id = get_string_arg(args, "parent_id")?;
    let title = get_string_arg(args, "title")?;

    let (parent, properties) = match parent_type.as_str() {
        "database" => {
            let mut properties = get_optional_object(args, "properties")?.unwrap_or_default();
            if !properties.contains_key("Name") {
                properties.insert("Name".to_string(), title_property(&title));
            }
            (Parent::DatabaseId(parent_id), properties)
        }
        "page" => {
            let mut properties = Map::new();
            properties.insert("title".to_string(), title_property(&title));
            (Parent::PageId(parent_id), properties)
        }
        other => {
            return Err(McpError::InvalidArg {
                name: "parent_type".to_string(),
                reason: format!("Unknown parent type '{}'. Use: page or database.", other),
            })
        }
    };

    Ok(CreatePageParams {
        parent,
        properties,
        children: get_optional_string(args, "content")?.map(|c| vec![paragraph_block(&c)]),
        icon: emoji_icon(args)?,
        cover: external_cover(args)?,
    })
}

/// Shape `update-page` arguments. Rejects calls that would change nothing.
pub fn build_update_page(args: &Map<String, JsonValue>) -> Result<UpdatePageParams> {
    let params = UpdatePageParams {
        properties: get_optional_object(args, "properties")?,
        archived: get_optional_bool(args, "archived")?,
        icon: emoji_icon(args)?,
        cover: external_cover(args)?,
    };
    if params.is_empty() {
        return Err(McpError::InvalidArg {
            name: "properties".to_string(),
            reason: "Nothing to update: pass properties, archived, icon_emoji, or cover_url"
                .to_string(),
        });
    }
    Ok(params)
}

fn emoji_icon(args: &Map<String, JsonValue>) -> Result<Option<JsonValue>> {
    Ok(get_optional_string(args, "icon_emoji")?
        .map(|emoji| json!({ "type": "emoji", "emoji": emoji })))
}

fn external_cover(args: &Map<String, JsonValue>) -> Result<Option<JsonValue>> {
    Ok(get_optional_string(args, "cover_url")?
        .map(|url| json!({ "type": "external", "external": { "url": url } })))
}
