//! Catalog tools: search_arxiv_papers, get_paper_details.

use serde_json::json;

use super::{McpTool, ToolContext};
use crate::config::limits;
use crate::error::{ToolError, ToolResult};
use crate::models::{PaperDetailsInput, PaperRecord, SearchPapersInput};

/// arXiv keyword search tool.
pub struct SearchArxivPapersTool;

#[async_trait::async_trait]
impl McpTool for SearchArxivPapersTool {
    fn name(&self) -> &'static str {
        "search_arxiv_papers"
    }

    fn description(&self) -> &'static str {
        "Search arXiv for research papers by keywords, authors, or topics. \
         Every result is kept in context for later analysis, chat and comparison."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search query (keywords, authors, titles). \
                                    Supports arXiv prefixes such as ti:, au:, abs:, cat:"
                },
                "max_results": {
                    "type": "integer",
                    "minimum": 1,
                    "maximum": limits::MAX_SEARCH_RESULTS,
                    "default": 10,
                    "description": "Maximum number of results (default: 10)"
                },
                "sort_by": {
                    "type": "string",
                    "enum": ["relevance", "lastUpdatedDate", "submittedDate"],
                    "default": "relevance",
                    "description": "Sort order: relevance, lastUpdatedDate, submittedDate"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(
        &self,
        ctx: &ToolContext,
        input: serde_json::Value,
    ) -> ToolResult<serde_json::Value> {
        let params: SearchPapersInput = serde_json::from_value(input)?;

        let query = params.query.trim();
        if query.is_empty() {
            return Err(ToolError::validation("query", "cannot be empty"));
        }

        let papers = ctx.search_papers(query, params.max_results, params.sort_by).await?;
        tracing::info!(query, count = papers.len(), "Found papers");

        let records: Vec<&PaperRecord> = papers.iter().map(AsRef::as_ref).collect();
        Ok(serde_json::to_value(records)?)
    }
}

/// Single-paper lookup tool.
pub struct GetPaperDetailsTool;

#[async_trait::async_trait]
impl McpTool for GetPaperDetailsTool {
    fn name(&self) -> &'static str {
        "get_paper_details"
    }

    fn description(&self) -> &'static str {
        "Get detailed information about a specific arXiv paper, including \
         comment, journal reference and DOI when available."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "arxiv_id": {
                    "type": "string",
                    "description": "arXiv paper ID (e.g., '2301.07041', 'arXiv:2301.07041v2', 'math.GT/0104020')"
                }
            },
            "required": ["arxiv_id"]
        })
    }

    async fn execute(
        &self,
        ctx: &ToolContext,
        input: serde_json::Value,
    ) -> ToolResult<serde_json::Value> {
        let params: PaperDetailsInput = serde_json::from_value(input)?;

        let paper = ctx.resolve_paper(&params.arxiv_id).await?;

        Ok(serde_json::to_value(&*paper)?)
    }
}
