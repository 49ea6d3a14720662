//! Comparison tool: compare_papers.
//!
//! Comparison is computed locally from stored metadata. No model call is made.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde_json::json;

use super::{McpTool, ToolContext};
use crate::error::{ToolError, ToolResult};
use crate::models::{ComparePapersInput, DEFAULT_COMPARISON_ASPECTS, PaperRecord};

/// Metadata comparison tool.
pub struct ComparePapersTool;

#[async_trait::async_trait]
impl McpTool for ComparePapersTool {
    fn name(&self) -> &'static str {
        "compare_papers"
    }

    fn description(&self) -> &'static str {
        "Compare multiple research papers: publication date range, combined \
         categories and authors. Needs at least two papers."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "paper_ids": {
                    "type": "array",
                    "items": {"type": "string"},
                    "minItems": 2,
                    "description": "List of arXiv paper IDs to compare"
                },
                "comparison_aspects": {
                    "type": "array",
                    "items": {"type": "string"},
                    "default": DEFAULT_COMPARISON_ASPECTS,
                    "description": "Aspects to compare"
                }
            },
            "required": ["paper_ids"]
        })
    }

    async fn execute(
        &self,
        ctx: &ToolContext,
        input: serde_json::Value,
    ) -> ToolResult<serde_json::Value> {
        let params: ComparePapersInput = serde_json::from_value(input)?;

        if params.paper_ids.len() < 2 {
            return Err(ToolError::insufficient_input("Need at least 2 papers to compare"));
        }

        let mut papers = Vec::with_capacity(params.paper_ids.len());
        let mut skipped = Vec::new();
        for id in &params.paper_ids {
            match ctx.resolve_paper(id).await {
                Ok(paper) => papers.push(paper),
                Err(e) => {
                    tracing::warn!(arxiv_id = %id, error = %e, "Skipping paper in comparison");
                    skipped.push(format!("{id}: {}", e.to_user_message()));
                }
            }
        }

        if papers.len() < 2 {
            return Err(ToolError::insufficient_input(
                "Could not fetch enough papers for comparison",
            ));
        }

        let records: Vec<&PaperRecord> = papers.iter().map(AsRef::as_ref).collect();
        let mut result = json!({
            "papers": records,
            "comparison_aspects": params.aspects(),
            "summary": summarize(&papers),
        });

        if !skipped.is_empty() {
            let mut warnings = vec![format!(
                "Compared {} of {} requested papers",
                papers.len(),
                params.paper_ids.len()
            )];
            warnings.extend(skipped);
            result["warnings"] = json!(warnings);
        }

        Ok(result)
    }
}

/// Date range plus sorted unions of categories and authors.
fn summarize(papers: &[Arc<PaperRecord>]) -> serde_json::Value {
    let earliest = papers.iter().map(|p| p.published.as_str()).min();
    let latest = papers.iter().map(|p| p.published.as_str()).max();

    let categories: BTreeSet<&str> =
        papers.iter().flat_map(|p| p.categories.iter().map(String::as_str)).collect();
    let authors: BTreeSet<&str> =
        papers.iter().flat_map(|p| p.authors.iter().map(String::as_str)).collect();

    json!({
        "total_papers": papers.len(),
        "date_range": {
            "earliest": earliest,
            "latest": latest,
        },
        "categories": categories,
        "authors": authors,
    })
}
