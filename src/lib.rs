//! # notion-mcp
//!
//! MCP (Model Context Protocol) server for the Notion API.
//!
//! This crate exposes Notion pages, databases, blocks, comments, users, and
//! search as tools for AI agents. It implements the MCP protocol over
//! stdin/stdout using JSON-RPC 2.0. Each tool call maps to exactly one Notion
//! API request; nothing is cached or retried.
//!
//! ## Tools
//!
//! `get-me`, `list-users`, `get-user`, `search`, `get-all-pages`, `get-page`,
//! `create-page`, `update-page`, `get-database`, `create-database`,
//! `query-database`, `get-block`, `get-block-children`,
//! `append-block-children`, `delete-block`, `list-comments`, `create-comment`
//!
//! Failures inside a tool (bad identifiers, Notion errors, network errors) are
//! returned as text content of the form `Error <action>: <message>`.
//!
//! ## Usage
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "notion": {
//!       "command": "/path/to/notion-mcp",
//!       "env": { "NOTION_API_TOKEN": "secret_..." }
//!     }
//!   }
//! }
//! ```
//!
//! ## Library Usage
//!
//! ```no_run
//! use notion_mcp::{ClientConfig, McpServer, NotionClient, ToolConfig, ToolRegistry};
//!
//! # async fn run() -> notion_mcp::Result<()> {
//! let client = NotionClient::new(ClientConfig::new("secret_token")?);
//! let registry = ToolRegistry::new(&ToolConfig::builtin());
//! let server = McpServer::new(client, registry);
//! server.run().await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod client;
mod config;
mod convert;
mod error;
mod ids;
mod server;
pub mod tools;
pub mod types;

pub use client::{ClientConfig, NotionClient, DEFAULT_BASE_URL, NOTION_VERSION};
pub use config::ToolConfig;
pub use convert::{paragraph_block, rich_text, title_property};
pub use error::{McpError, Result};
pub use ids::normalize_id;
pub use server::{JsonRpcRequest, JsonRpcResponse, McpServer, PROTOCOL_VERSION, SERVER_NAME};
pub use tools::{ToolDef, ToolRegistry, ToolResult};
