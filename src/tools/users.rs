//! User tools.
//!
//! Tools: get-me, list-users, get-user

use serde_json::{Map, Value as JsonValue};

use crate::client::NotionClient;
use crate::convert::{get_pagination, get_string_arg, json_to_text};
use crate::error::{McpError, Result};
use crate::schema;
use crate::tools::ToolDef;

/// Get all user tool definitions.
pub fn tools() -> Vec<ToolDef> {
    vec![
        ToolDef::new(
            "get-me",
            "retrieving current user",
            "Retrieve the bot user associated with the integration token, including the \
             workspace it belongs to.",
            schema!(object {}),
        ),
        ToolDef::new(
            "list-users",
            "listing users",
            "List all users in the workspace. Paginated: pass next_cursor from a previous \
             response as start_cursor.",
            schema!(object {
                optional: {
                    "start_cursor": string => "Cursor from a previous response",
                    "page_size": page_size => "Number of users to return (1-100)"
                }
            }),
        ),
        ToolDef::new(
            "get-user",
            "retrieving user",
            "Retrieve a single user by ID.",
            schema!(object {
                required: { "user_id": string => "ID of the user" }
            }),
        ),
    ]
}

/// Dispatch a user tool call.
pub async fn dispatch(
    client: &NotionClient,
    name: &str,
    args: Map<String, JsonValue>,
) -> Result<String> {
    let response = match name {
        "get-me" => client.get_me().await?,
        "list-users" => {
            let pagination = get_pagination(&args)?;
            client.list_users(&pagination).await?
        }
        "get-user" => {
            let user_id = get_string_arg(&args, "user_id")?;
            client.get_user(&user_id).await?
        }
        _ => return Err(McpError::UnknownTool(name.to_string())),
    };
    json_to_text(&response)
}
