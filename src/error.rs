//! Error types for the Notion MCP server.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, McpError>;

/// Errors raised while validating tool arguments or talking to the Notion API.
#[derive(Debug, Error)]
pub enum McpError {
    /// Identifier could not be reduced to 32 hex characters.
    #[error("Invalid Notion ID format: '{0}'")]
    InvalidId(String),

    /// A required tool argument was absent or had the wrong type.
    #[error("Missing required argument: {0}")]
    MissingArg(String),

    /// A tool argument was present but unusable.
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArg {
        /// Argument name
        name: String,
        /// Why it was rejected
        reason: String,
    },

    /// Tool name is unknown or not registered.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// The Notion API answered with a non-success status.
    #[error(
        "Notion API error {status} on {endpoint}: {message}{}",
        format_request_id(.request_id)
    )]
    Api {
        /// HTTP status code
        status: u16,
        /// Remote `message` field, or the raw body when absent
        message: String,
        /// Request path, e.g. `/v1/pages/...`
        endpoint: String,
        /// Remote-assigned request id, if any
        request_id: Option<String>,
    },

    /// No response was obtained.
    #[error("Request to Notion API failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A success response carried a body that is not JSON.
    #[error("Failed to decode Notion API response from {endpoint}: {reason}")]
    Decode {
        /// Request path
        endpoint: String,
        /// Decoder message
        reason: String,
    },

    /// Startup configuration problem.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON (de)serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Stdio failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_request_id(request_id: &Option<String>) -> String {
    match request_id {
        Some(id) => format!(" (request id: {})", id),
        None => String::new(),
    }
}
