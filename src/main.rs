//! notion-mcp binary entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use url::Url;

use notion_mcp::{ClientConfig, McpServer, NotionClient, ToolConfig, ToolRegistry};

/// MCP server exposing the Notion API as agent tools.
#[derive(Parser, Debug)]
#[command(name = "notion-mcp", version, about)]
struct Cli {
    /// Notion integration token
    #[arg(long, env = "NOTION_API_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Notion API base URL
    #[arg(long, env = "NOTION_BASE_URL", default_value = notion_mcp::DEFAULT_BASE_URL)]
    base_url: String,

    /// Hide a tool from the host (repeatable)
    #[arg(long = "disable-tool", value_name = "NAME")]
    disabled_tools: Vec<String>,
}

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries the protocol.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("notion_mcp=info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();

    let server = match build_server(cli) {
        Ok(server) => server,
        Err(e) => {
            eprintln!("notion-mcp: {}", e);
            return ExitCode::from(1);
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("notion-mcp: failed to start runtime: {}", e);
            return ExitCode::from(1);
        }
    };

    match runtime.block_on(server.run()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("server error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn build_server(cli: Cli) -> notion_mcp::Result<McpServer> {
    let token = cli
        .token
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| {
            notion_mcp::McpError::Config(
                "NOTION_API_TOKEN is not set (pass --token or set the environment variable)"
                    .to_string(),
            )
        })?;

    let base_url = Url::parse(&cli.base_url).map_err(|e| {
        notion_mcp::McpError::Config(format!("invalid base URL '{}': {}", cli.base_url, e))
    })?;

    let client = NotionClient::new(ClientConfig::new(token)?.with_base_url(base_url));
    let config = ToolConfig::builtin().disabling(&cli.disabled_tools);
    let registry = ToolRegistry::new(&config);

    info!(
        base_url = %client.base_url(),
        tools = registry.tools().len(),
        "notion-mcp configured"
    );
    Ok(McpServer::new(client, registry))
}
