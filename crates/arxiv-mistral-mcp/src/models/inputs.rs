//! Input models for MCP tool parameters.
//!
//! Argument names are snake_case, as advertised in `tools/list`.

use serde::{Deserialize, Serialize};

use super::{ChatTurn, SortBy};

/// Default analysis question.
pub const DEFAULT_QUESTION: &str = "Provide a comprehensive analysis of this paper";

/// Aspects used when a comparison request names none.
pub const DEFAULT_COMPARISON_ASPECTS: &[&str] = &[
    "methodology",
    "key_contributions",
    "datasets_used",
    "performance_metrics",
    "publication_timeline",
];

/// Input for `search_arxiv_papers`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPapersInput {
    /// arXiv query (keywords, `au:`, `ti:`, `cat:` prefixes...).
    pub query: String,

    /// Maximum papers to return.
    #[serde(default = "default_max_results")]
    pub max_results: u32,

    /// Sort order.
    #[serde(default)]
    pub sort_by: SortBy,
}

fn default_max_results() -> u32 {
    10
}

/// Input for `get_paper_details`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperDetailsInput {
    /// arXiv identifier (e.g. "2301.07041").
    pub arxiv_id: String,
}

/// Input for `analyze_paper_with_mistral`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzePaperInput {
    /// Paper to analyze.
    pub arxiv_id: String,

    /// Question or analysis request.
    #[serde(default = "default_question")]
    pub question: String,

    /// Mistral agent to route the request to.
    #[serde(default)]
    pub agent_id: Option<String>,
}

fn default_question() -> String {
    DEFAULT_QUESTION.to_string()
}

/// Input for `chat_about_papers`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatAboutPapersInput {
    /// User message.
    pub message: String,

    /// Papers to put in context.
    #[serde(default)]
    pub paper_ids: Vec<String>,

    /// Previous turns, oldest first.
    #[serde(default)]
    pub conversation_history: Vec<ChatTurn>,

    /// Mistral agent to route the request to.
    #[serde(default)]
    pub agent_id: Option<String>,
}

/// Input for `compare_papers`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparePapersInput {
    /// Papers to compare (at least two).
    pub paper_ids: Vec<String>,

    /// Aspects to compare on.
    #[serde(default)]
    pub comparison_aspects: Option<Vec<String>>,
}

impl ComparePapersInput {
    /// Requested aspects, or the defaults when none were given.
    #[must_use]
    pub fn aspects(&self) -> Vec<String> {
        match &self.comparison_aspects {
            Some(aspects) if !aspects.is_empty() => aspects.clone(),
            _ => DEFAULT_COMPARISON_ASPECTS.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}
