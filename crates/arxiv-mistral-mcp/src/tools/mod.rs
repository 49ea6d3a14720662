//! MCP tool implementations.
//!
//! Each tool:
//! 1. Parses and validates its arguments
//! 2. Resolves papers through the store, fetching from arXiv on a miss
//! 3. Calls Mistral where the tool needs generated text
//! 4. Returns a JSON value that the dispatcher wraps as text content

mod analysis;
mod compare;
mod papers;

pub use analysis::*;
pub use compare::*;
pub use papers::*;

use std::sync::Arc;

use crate::client::{
    ArxivClient, CompletionTarget, LanguageModel, MistralClient, PaperCatalog, normalize_id,
};
use crate::config::{Config, api};
use crate::error::{ToolError, ToolResult};
use crate::models::{PaperRecord, SortBy};
use crate::store::PaperStore;

/// Tool execution context.
///
/// Owns the paper store and both upstream clients. The dispatcher handles one
/// request at a time, so a store check followed by a fetch and a put is not
/// interleaved with another request.
#[derive(Clone)]
pub struct ToolContext {
    /// Paper catalog (arXiv).
    pub catalog: Arc<dyn PaperCatalog>,

    /// Language model (Mistral).
    pub llm: Arc<dyn LanguageModel>,

    /// Papers seen so far.
    pub store: PaperStore,

    /// Model used when no agent is selected.
    pub model: String,

    /// Agent used when a request names none.
    pub agent_id: Option<String>,
}

impl ToolContext {
    /// Create a new tool context.
    #[must_use]
    pub fn new(
        catalog: Arc<dyn PaperCatalog>,
        llm: Arc<dyn LanguageModel>,
        store: PaperStore,
        model: impl Into<String>,
        agent_id: Option<String>,
    ) -> Self {
        Self { catalog, llm, store, model: model.into(), agent_id }
    }

    /// Build the HTTP clients described by `config` around an empty store.
    ///
    /// # Errors
    ///
    /// Returns error if either HTTP client cannot be built.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let catalog = Arc::new(ArxivClient::new(config)?);
        let llm = Arc::new(MistralClient::new(config)?);

        Ok(Self::new(
            catalog,
            llm,
            PaperStore::new(),
            config.model.clone(),
            config.agent_id.clone(),
        ))
    }

    /// Pick the completion backend for one call.
    ///
    /// A usable agent id (from the request, else from configuration) selects
    /// the agents endpoint. A blank id or the placeholder id selects the
    /// configured model.
    #[must_use]
    pub fn completion_target(&self, requested: Option<&str>) -> CompletionTarget {
        let usable = |id: &&str| !id.is_empty() && *id != api::PLACEHOLDER_AGENT_ID;
        let agent_id = requested
            .map(str::trim)
            .filter(usable)
            .or_else(|| self.agent_id.as_deref().map(str::trim).filter(usable));

        match agent_id {
            Some(agent_id) => CompletionTarget::Agent { agent_id: agent_id.to_string() },
            None => CompletionTarget::Model { model: self.model.clone() },
        }
    }

    /// Search arXiv and store every result.
    ///
    /// # Errors
    ///
    /// Returns error if the search fails.
    pub async fn search_papers(
        &self,
        query: &str,
        max_results: u32,
        sort: SortBy,
    ) -> ToolResult<Vec<Arc<PaperRecord>>> {
        let papers = self
            .catalog
            .search(query, max_results, sort)
            .await
            .map_err(|e| ToolError::client("Search failed", e))?;

        let mut stored = Vec::with_capacity(papers.len());
        for paper in papers {
            stored.push(self.store.put(paper).await);
        }

        Ok(stored)
    }

    /// Return a paper from the store, fetching and storing it on a miss.
    ///
    /// # Errors
    ///
    /// Returns error if the identifier is invalid or the fetch fails.
    pub async fn resolve_paper(&self, raw_id: &str) -> ToolResult<Arc<PaperRecord>> {
        let arxiv_id =
            normalize_id(raw_id).map_err(|e| ToolError::client("Failed to fetch paper", e))?;

        if let Some(paper) = self.store.get(&arxiv_id).await {
            tracing::debug!(arxiv_id = %arxiv_id, "Paper store hit");
            return Ok(paper);
        }

        let paper = self
            .catalog
            .fetch_by_id(&arxiv_id)
            .await
            .map_err(|e| ToolError::client("Failed to fetch paper", e))?;

        tracing::debug!(arxiv_id = %arxiv_id, "Fetched paper from arXiv");
        Ok(self.store.put(paper).await)
    }
}

impl std::fmt::Debug for ToolContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolContext")
            .field("store", &self.store)
            .field("model", &self.model)
            .field("agent_id", &self.agent_id)
            .finish()
    }
}

/// Trait for MCP tools.
#[async_trait::async_trait]
pub trait McpTool: Send + Sync {
    /// Tool name (e.g., "search_arxiv_papers").
    fn name(&self) -> &'static str;

    /// Tool description for LLM.
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters.
    fn input_schema(&self) -> serde_json::Value;

    /// Execute the tool with given input.
    async fn execute(
        &self,
        ctx: &ToolContext,
        input: serde_json::Value,
    ) -> ToolResult<serde_json::Value>;
}

/// Register all tools.
///
/// `tools/list` and `tools/call` both read this list.
#[must_use]
pub fn register_all_tools() -> Vec<Box<dyn McpTool>> {
    vec![
        // Catalog tools (2)
        Box::new(papers::SearchArxivPapersTool),
        Box::new(papers::GetPaperDetailsTool),

        // Model-backed tools (2)
        Box::new(analysis::AnalyzePaperTool),
        Box::new(analysis::ChatAboutPapersTool),

        // Comparison (1)
        Box::new(compare::ComparePapersTool),
    ]
}

/// Current time for result payloads.
pub(crate) fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}
