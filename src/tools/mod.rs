//! Tool registry and dispatch.
//!
//! Each Notion resource family lives in its own module exposing `tools()`
//! (definitions), pure `build_*` functions that shape flat arguments into
//! client inputs, and an async `dispatch`. The registry filters definitions
//! through [`ToolConfig`] once at construction and turns every handler
//! failure into error text, so a `tools/call` never fails at the protocol
//! level because of Notion.

pub mod blocks;
pub mod comments;
pub mod databases;
pub mod pages;
pub mod search;
pub mod users;

use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use tracing::{debug, warn};

use crate::client::NotionClient;
use crate::config::ToolConfig;
use crate::error::{McpError, Result};

/// Resource family a tool belongs to; selects the dispatch module.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ToolGroup {
    /// `users`
    #[default]
    Users,
    /// `search`
    Search,
    /// `pages`
    Pages,
    /// `databases`
    Databases,
    /// `blocks`
    Blocks,
    /// `comments`
    Comments,
}

/// A tool definition for the MCP tools/list response.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDef {
    /// Tool name (e.g., "get-page")
    pub name: String,
    /// Tool description
    pub description: String,
    /// JSON Schema for the input parameters
    #[serde(rename = "inputSchema")]
    pub input_schema: JsonValue,
    /// Gerund phrase used in error text, e.g. "retrieving page"
    #[serde(skip)]
    pub action: &'static str,
    /// Dispatch module
    #[serde(skip)]
    pub group: ToolGroup,
}

impl ToolDef {
    /// Create a new tool definition.
    pub fn new(name: &str, action: &'static str, description: &str, input_schema: JsonValue) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            input_schema,
            action,
            group: ToolGroup::default(),
        }
    }

    fn in_group(mut self, group: ToolGroup) -> Self {
        self.group = group;
        self
    }
}

/// One item of a tool result. Always `{"type": "text", "text": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolContent {
    /// Content kind
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Payload
    pub text: String,
}

/// Result of a `tools/call`, rendered for the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolResult {
    /// Ordered content items
    pub content: Vec<ToolContent>,
}

impl ToolResult {
    /// A result holding a single text item.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent {
                kind: "text",
                text: text.into(),
            }],
        }
    }

    /// Text of the first content item.
    pub fn first_text(&self) -> Option<&str> {
        self.content.first().map(|c| c.text.as_str())
    }
}

/// Every tool this server knows about, before enablement filtering.
pub fn all_tools() -> Vec<ToolDef> {
    let families = [
        (ToolGroup::Users, users::tools()),
        (ToolGroup::Search, search::tools()),
        (ToolGroup::Pages, pages::tools()),
        (ToolGroup::Databases, databases::tools()),
        (ToolGroup::Blocks, blocks::tools()),
        (ToolGroup::Comments, comments::tools()),
    ];
    families
        .into_iter()
        .flat_map(|(group, defs)| defs.into_iter().map(move |d| d.in_group(group)))
        .collect()
}

/// Registry of available MCP tools.
pub struct ToolRegistry {
    tools: Vec<ToolDef>,
}

impl ToolRegistry {
    /// Create the registry, keeping only tools enabled in `config`.
    pub fn new(config: &ToolConfig) -> Self {
        let tools: Vec<ToolDef> = all_tools()
            .into_iter()
            .filter(|t| {
                let enabled = config.is_enabled(&t.name);
                if !enabled {
                    debug!(tool = %t.name, "tool disabled");
                }
                enabled
            })
            .collect();
        Self { tools }
    }

    /// Get all registered tool definitions.
    pub fn tools(&self) -> &[ToolDef] {
        &self.tools
    }

    /// Look up a registered tool.
    pub fn get(&self, name: &str) -> Option<&ToolDef> {
        self.tools.iter().find(|t| t.name == name)
    }

    /// Invoke a registered tool.
    ///
    /// Only an unregistered name is an `Err`. Validation, API, and transport
    /// failures come back as `Ok` with `Error <action>: <message>` text.
    pub async fn call(
        &self,
        client: &NotionClient,
        name: &str,
        args: Map<String, JsonValue>,
    ) -> Result<ToolResult> {
        let def = self
            .get(name)
            .ok_or_else(|| McpError::UnknownTool(name.to_string()))?;

        let outcome = match def.group {
            ToolGroup::Users => users::dispatch(client, name, args).await,
            ToolGroup::Search => search::dispatch(client, name, args).await,
            ToolGroup::Pages => pages::dispatch(client, name, args).await,
            ToolGroup::Databases => databases::dispatch(client, name, args).await,
            ToolGroup::Blocks => blocks::dispatch(client, name, args).await,
            ToolGroup::Comments => comments::dispatch(client, name, args).await,
        };

        Ok(match outcome {
            Ok(text) => ToolResult::text(text),
            Err(err) => {
                warn!(tool = name, error = %err, "tool call failed");
                ToolResult::text(format!("Error {}: {}", def.action, err))
            }
        })
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new(&ToolConfig::builtin())
    }
}

/// Helper macro for creating JSON Schema for tool input parameters.
///
/// Each property is `"name": type` or `"name": type => "description"`.
/// A bracketed list of string literals declares a string enum.
#[macro_export]
macro_rules! schema {
    // Object with required and optional properties
    (object {
        required: { $($req_name:literal : $req_type:tt $(=> $req_desc:literal)?),* $(,)? },
        optional: { $($opt_name:literal : $opt_type:tt $(=> $opt_desc:literal)?),* $(,)? }
    }) => {{
        let mut required: Vec<&str> = Vec::new();
        $(required.push($req_name);)*

        let mut props = serde_json::Map::new();
        $(props.insert($req_name.to_string(), schema!(@prop $req_type $(, $req_desc)?));)*
        $(props.insert($opt_name.to_string(), schema!(@prop $opt_type $(, $opt_desc)?));)*

        serde_json::json!({
            "type": "object",
            "properties": props,
            "required": required
        })
    }};

    // Object with only required properties
    (object {
        required: { $($req_name:literal : $req_type:tt $(=> $req_desc:literal)?),* $(,)? }
    }) => {{
        let mut required: Vec<&str> = Vec::new();
        $(required.push($req_name);)*

        let mut props = serde_json::Map::new();
        $(props.insert($req_name.to_string(), schema!(@prop $req_type $(, $req_desc)?));)*

        serde_json::json!({
            "type": "object",
            "properties": props,
            "required": required
        })
    }};

    // Object with only optional properties
    (object {
        optional: { $($opt_name:literal : $opt_type:tt $(=> $opt_desc:literal)?),* $(,)? }
    }) => {{
        let mut props = serde_json::Map::new();
        $(props.insert($opt_name.to_string(), schema!(@prop $opt_type $(, $opt_desc)?));)*

        serde_json::json!({
            "type": "object",
            "properties": props,
            "required": []
        })
    }};

    // Empty object (no parameters)
    (object {}) => {{
        serde_json::json!({
            "type": "object",
            "properties": {},
            "required": []
        })
    }};

    (@prop $t:tt) => { schema!(@type $t) };
    (@prop $t:tt, $desc:literal) => {{
        let mut prop = schema!(@type $t);
        if let Some(obj) = prop.as_object_mut() {
            obj.insert("description".to_string(), serde_json::json!($desc));
        }
        prop
    }};

    // Type mappings
    (@type string) => { serde_json::json!({"type": "string"}) };
    (@type integer) => { serde_json::json!({"type": "integer"}) };
    (@type boolean) => { serde_json::json!({"type": "boolean"}) };
    (@type object) => { serde_json::json!({"type": "object"}) };
    (@type array_object) => { serde_json::json!({"type": "array", "items": {"type": "object"}}) };
    (@type page_size) => { serde_json::json!({"type": "integer", "minimum": 1, "maximum": 100}) };
    (@type [$($variant:literal),* $(,)?]) => { serde_json::json!({"type": "string", "enum": [$($variant),*]}) };
}
