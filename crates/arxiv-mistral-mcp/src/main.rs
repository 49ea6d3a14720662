//! arXiv / Mistral MCP Server - Entry Point
//!
//! Serves MCP over stdio. Logs go to stderr; stdout carries only protocol
//! messages.

use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use arxiv_mistral_mcp::{config::Config, server::McpServer, tools::ToolContext};

#[derive(Parser, Debug)]
#[command(name = "arxiv-mistral-mcp")]
#[command(about = "MCP server for arXiv search with Mistral-powered paper analysis")]
#[command(version)]
struct Cli {
    /// Mistral API key (required for analysis and chat)
    #[arg(long, env = "MISTRAL_API_KEY", hide_env_values = true)]
    mistral_api_key: Option<String>,

    /// Chat completion model used when no agent is selected
    #[arg(long, env = "MISTRAL_MODEL", default_value = "mistral-large-latest")]
    model: String,

    /// Default Mistral agent ID
    #[arg(long, env = "MISTRAL_AGENT_ID")]
    agent_id: Option<String>,

    /// arXiv query endpoint
    #[arg(long, default_value = "https://export.arxiv.org/api/query")]
    arxiv_url: String,

    /// Mistral API base URL
    #[arg(long, default_value = "https://api.mistral.ai")]
    mistral_url: String,

    /// Upstream request timeout in seconds (also caps the 10s connect timeout)
    #[arg(long, default_value = "60")]
    timeout_secs: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

impl Cli {
    fn into_config(self) -> Config {
        let mut config = Config::new(self.mistral_api_key);
        config.model = self.model;
        config.set_agent_id(self.agent_id);
        config.arxiv_api_url = self.arxiv_url;
        config.mistral_api_url = self.mistral_url;
        config.set_request_timeout(Duration::from_secs(self.timeout_secs));
        config
    }
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)).init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting arXiv / Mistral MCP server");

    let config = cli.into_config();
    config.validate()?;

    if !config.has_api_key() {
        tracing::warn!("MISTRAL_API_KEY not set, analysis and chat tools will report an error");
    }

    let ctx = ToolContext::from_config(&config)?;
    let server = McpServer::new(ctx);

    server.run_stdio().await?;

    Ok(())
}
