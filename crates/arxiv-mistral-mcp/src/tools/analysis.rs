//! Model-backed tools: analyze_paper_with_mistral, chat_about_papers.

use serde_json::json;

use super::{McpTool, ToolContext, timestamp};
use crate::error::{ToolError, ToolResult};
use crate::formatters;
use crate::models::{
    AnalyzePaperInput, ChatAboutPapersInput, ChatTurn, PaperRecord, Role, system_turns_lead,
};

const NOT_CONFIGURED: &str = "MISTRAL_API_KEY not configured";

/// Single-paper analysis tool.
pub struct AnalyzePaperTool;

#[async_trait::async_trait]
impl McpTool for AnalyzePaperTool {
    fn name(&self) -> &'static str {
        "analyze_paper_with_mistral"
    }

    fn description(&self) -> &'static str {
        "Analyze a research paper using Mistral AI. The paper is fetched from arXiv \
         if it is not already in context."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "arxiv_id": {
                    "type": "string",
                    "description": "arXiv paper ID to analyze"
                },
                "question": {
                    "type": "string",
                    "description": "Specific question or analysis request",
                    "default": "Provide a comprehensive analysis of this paper"
                },
                "agent_id": {
                    "type": "string",
                    "description": "Mistral agent ID to use instead of the default model"
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
        let params: AnalyzePaperInput = serde_json::from_value(input)?;

        if !ctx.llm.is_configured() {
            return Err(ToolError::config(NOT_CONFIGURED));
        }

        let paper = ctx.resolve_paper(&params.arxiv_id).await?;
        let prompt = formatters::format_analysis_prompt(&paper, &params.question);
        let target = ctx.completion_target(params.agent_id.as_deref());

        tracing::info!(arxiv_id = %paper.arxiv_id, agent = ?target.agent_id(), "Analyzing paper");

        let analysis = ctx
            .llm
            .complete(&[ChatTurn::user(prompt)], &target)
            .await
            .map_err(|e| ToolError::client("Analysis failed", e))?;

        let mut result = json!({
            "arxiv_id": paper.arxiv_id,
            "paper_title": paper.title,
            "question": params.question,
            "analysis": analysis,
            "timestamp": timestamp(),
        });
        if let Some(agent_id) = target.agent_id() {
            result["agent_id"] = json!(agent_id);
        }
        if let Some(model) = target.model() {
            result["model"] = json!(model);
        }

        Ok(result)
    }
}

/// Conversation tool with papers in context.
pub struct ChatAboutPapersTool;

#[async_trait::async_trait]
impl McpTool for ChatAboutPapersTool {
    fn name(&self) -> &'static str {
        "chat_about_papers"
    }

    fn description(&self) -> &'static str {
        "Have a conversation about research papers with AI assistance. \
         Listed papers are summarized for the model; earlier turns can be passed back in."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "message": {
                    "type": "string",
                    "description": "Your question or message about the papers"
                },
                "paper_ids": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "List of arXiv paper IDs to include in context"
                },
                "conversation_history": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "role": {"type": "string", "enum": ["user", "assistant"]},
                            "content": {"type": "string"}
                        },
                        "required": ["role", "content"]
                    },
                    "description": "Previous turns, oldest first"
                },
                "agent_id": {
                    "type": "string",
                    "description": "Mistral agent ID to use instead of the default model"
                }
            },
            "required": ["message"]
        })
    }

    async fn execute(
        &self,
        ctx: &ToolContext,
        input: serde_json::Value,
    ) -> ToolResult<serde_json::Value> {
        let params: ChatAboutPapersInput = serde_json::from_value(input)?;

        if params.message.trim().is_empty() {
            return Err(ToolError::validation("message", "cannot be empty"));
        }
        if !ctx.llm.is_configured() {
            return Err(ToolError::config(NOT_CONFIGURED));
        }

        let mut papers = Vec::with_capacity(params.paper_ids.len());
        let mut unresolved = Vec::new();
        for id in &params.paper_ids {
            match ctx.resolve_paper(id).await {
                Ok(paper) => papers.push(paper),
                Err(e) => {
                    tracing::warn!(arxiv_id = %id, error = %e, "Leaving paper out of chat context");
                    unresolved.push(id.clone());
                }
            }
        }

        let context: Vec<&PaperRecord> = papers.iter().map(AsRef::as_ref).collect();
        let mut messages = vec![ChatTurn::system(formatters::format_chat_system_prompt(&context))];
        messages.extend(
            params.conversation_history.into_iter().filter(|turn| turn.role != Role::System),
        );
        messages.push(ChatTurn::user(params.message));
        debug_assert!(system_turns_lead(&messages));

        let target = ctx.completion_target(params.agent_id.as_deref());
        tracing::info!(
            papers = papers.len(),
            turns = messages.len(),
            agent = ?target.agent_id(),
            "Chatting about papers"
        );

        let response = ctx
            .llm
            .complete(&messages, &target)
            .await
            .map_err(|e| ToolError::client("Chat failed", e))?;

        let in_context: Vec<&str> = papers.iter().map(|p| p.arxiv_id.as_str()).collect();
        let mut result = json!({
            "response": response,
            "papers_in_context": in_context,
            "unresolved_papers": unresolved,
            "timestamp": timestamp(),
        });
        if let Some(agent_id) = target.agent_id() {
            result["agent_id"] = json!(agent_id);
        }
        if let Some(model) = target.model() {
            result["model"] = json!(model);
        }

        Ok(result)
    }
}
