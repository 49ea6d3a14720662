//! MCP server implementation.
//!
//! Speaks newline-delimited JSON-RPC over stdin/stdout, one request at a time.

pub mod protocol;
pub mod stdio;

use crate::tools::{self, McpTool, ToolContext};

/// MCP server for arXiv and Mistral.
pub struct McpServer {
    /// Tool execution context.
    ctx: ToolContext,

    /// Registered tools.
    tools: Vec<Box<dyn McpTool>>,
}

impl McpServer {
    /// Create a new MCP server.
    #[must_use]
    pub fn new(ctx: ToolContext) -> Self {
        let tools = tools::register_all_tools();

        Self { ctx, tools }
    }

    /// Run the server on the process's stdin and stdout until EOF or Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns error on I/O failure.
    pub async fn run_stdio(self) -> anyhow::Result<()> {
        tracing::info!("Starting MCP server in stdio mode");
        tracing::info!("Registered {} tools", self.tools.len());

        let reader = tokio::io::BufReader::new(tokio::io::stdin());
        let writer = tokio::io::stdout();

        stdio::serve(reader, writer, &self.tools, &self.ctx, shutdown_signal()).await
    }
}

impl std::fmt::Debug for McpServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("McpServer").field("tools", &self.tools.len()).finish()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received shutdown signal");
}
