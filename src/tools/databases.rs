//! Database tools.
//!
//! Tools: get-database, create-database, query-database

use serde_json::{json, Map, Value as JsonValue};

use crate::client::NotionClient;
use crate::convert::{
    get_optional_object, get_optional_object_array, get_pagination, get_string_arg, json_to_text,
    rich_text,
};
use crate::error::{McpError, Result};
use crate::schema;
use crate::tools::ToolDef;
use crate::types::{CreateDatabaseParams, Parent, QueryDatabaseParams};

/// Get all database tool definitions.
pub fn tools() -> Vec<ToolDef> {
    vec![
        ToolDef::new(
            "get-database",
            "retrieving database",
            "Retrieve a database's title and property schema by ID.",
            schema!(object {
                required: { "database_id": string => "ID of the database" }
            }),
        ),
        ToolDef::new(
            "create-database",
            "creating database",
            "Create a database inside a parent page. properties is the column schema, e.g. \
             {\"Name\": {\"title\": {}}, \"Done\": {\"checkbox\": {}}}; when omitted the \
             database gets a single Name title column.",
            schema!(object {
                required: {
                    "parent_page_id": string => "ID of the parent page",
                    "title": string => "Database title"
                },
                optional: {
                    "properties": object => "Property schema"
                }
            }),
        ),
        ToolDef::new(
            "query-database",
            "querying database",
            "Query the pages of a database, optionally with a Notion filter object and \
             sort list. Paginated with start_cursor and page_size.",
            schema!(object {
                required: { "database_id": string => "ID of the database" },
                optional: {
                    "filter": object => "Notion filter object",
                    "sorts": array_object => "Notion sort objects",
                    "start_cursor": string => "Cursor from a previous response",
                    "page_size": page_size => "Number of results to return (1-100)"
                }
            }),
        ),
    ]
}

/// Dispatch a database tool call.
pub async fn dispatch(
    client: &NotionClient,
    name: &str,
    args: Map<String, JsonValue>,
) -> Result<String> {
    let response = match name {
        "get-database" => {
            let database_id = get_string_arg(&args, "database_id")?;
            client.get_database(&database_id).await?
        }
        "create-database" => {
            let params = build_create_database(&args)?;
            client.create_database(&params).await?
        }
        "query-database" => {
            let database_id = get_string_arg(&args, "database_id")?;
            let params = build_query_database(&args)?;
            client.query_database(&database_id, &params).await?
        }
        _ => return Err(McpError::UnknownTool(name.to_string())),
    };
    json_to_text(&response)
}

/// Shape `create-database` arguments, defaulting the schema to one `Name` title column.
pub fn build_create_database(args: &Map<String, JsonValue>) -> Result<CreateDatabaseParams> {
    let parent_page_id = get_string_arg(args, "parent_page_id")?;
    let title = get_string_arg(args, "title")?;

    let properties = get_optional_object(args, "properties")?.unwrap_or_else(|| {
        let mut default = Map::new();
        default.insert("Name".to_string(), json!({ "title": {} }));
        default
    });

    Ok(CreateDatabaseParams {
        parent: Parent::PageId(parent_page_id),
        title: rich_text(&title),
        properties,
    })
}

/// Shape `query-database` arguments.
pub fn build_query_database(args: &Map<String, JsonValue>) -> Result<QueryDatabaseParams> {
    Ok(QueryDatabaseParams {
        filter: get_optional_object(args, "filter")?.map(JsonValue::Object),
        sorts: get_optional_object_array(args, "sorts")?,
        pagination: get_pagination(args)?,
    })
}
