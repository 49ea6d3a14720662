//! Prompt text sent to the language model.
//!
//! Prompts are deterministic: the same papers and question always produce the
//! same text.

use crate::config::limits;
use crate::models::PaperRecord;

use super::truncate_words;

/// System instruction opening every chat.
pub const CHAT_SYSTEM_PREAMBLE: &str =
    "You are a research assistant helping analyze and discuss academic papers.";

/// Aspects every analysis is asked to cover.
const ANALYSIS_AXES: [&str; 5] = [
    "Key contributions and novelty",
    "Methodology and approach",
    "Results and implications",
    "Strengths and limitations",
    "Relevance to current research trends",
];

/// Build the single-paper analysis prompt.
#[must_use]
pub fn format_analysis_prompt(paper: &PaperRecord, question: &str) -> String {
    let abstract_text = truncate_words(&paper.r#abstract, limits::ANALYSIS_ABSTRACT_CHARS);

    let mut output = String::from("Research Paper Analysis Request:\n\n");

    output.push_str(&format!("Title: {}\n", paper.title));
    output.push_str(&format!("Authors: {}\n", paper.author_names()));
    output.push_str(&format!("Published: {}\n", paper.published));
    output.push_str(&format!("Categories: {}\n", paper.category_list()));
    output.push_str(&format!("Abstract: {abstract_text}\n\n"));

    output.push_str(&format!("Question/Analysis Request: {question}\n\n"));
    output.push_str(
        "Please provide a detailed analysis addressing the question while considering:\n",
    );
    for (i, axis) in ANALYSIS_AXES.iter().enumerate() {
        output.push_str(&format!("{}. {axis}\n", i + 1));
    }

    output
}

/// Build the chat system prompt listing the papers in context.
///
/// With no papers the preamble stands alone.
#[must_use]
pub fn format_chat_system_prompt(papers: &[&PaperRecord]) -> String {
    let mut output = CHAT_SYSTEM_PREAMBLE.to_string();

    if papers.is_empty() {
        return output;
    }

    output.push_str("\n\nCurrent papers in context:\n");
    for paper in papers {
        let abstract_text = truncate_words(&paper.r#abstract, limits::CHAT_ABSTRACT_CHARS);
        output.push_str(&format!("\nPaper {}:\n", paper.arxiv_id));
        output.push_str(&format!("Title: {}\n", paper.title));
        output.push_str(&format!("Authors: {}\n", paper.author_names()));
        output.push_str(&format!("Abstract: {abstract_text}\n"));
        output.push_str("---\n");
    }

    output
}
