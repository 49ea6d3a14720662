//! arXiv / Mistral MCP Server
//!
//! A Model Context Protocol (MCP) server that searches arXiv and uses Mistral to
//! analyze and discuss the papers it finds.
//!
//! # Features
//!
//! - **5 MCP Tools**: search, paper details, analysis, chat, comparison
//! - **Paper store**: every paper seen is kept for the life of the process
//! - **Polite**: arXiv requests are spaced out, transient failures retried
//! - **Agent-aware**: Mistral agents or plain chat models, chosen per call
//!
//! # Example
//!
//! ```no_run
//! use arxiv_mistral_mcp::{config::Config, server::McpServer, tools::ToolContext};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let ctx = ToolContext::from_config(&config)?;
//!
//!     McpServer::new(ctx).run_stdio().await
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod formatters;
pub mod models;
pub mod server;
pub mod store;
pub mod tools;

pub use client::{ArxivClient, MistralClient};
pub use config::Config;
pub use error::{ClientError, ToolError};
pub use store::PaperStore;
