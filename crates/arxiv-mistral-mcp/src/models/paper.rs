//! Paper record normalized from the arXiv Atom feed.

use serde::{Deserialize, Serialize};

/// A paper as returned by arXiv search or lookup.
///
/// Field names match the tool output consumed by MCP clients.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRecord {
    /// arXiv accession number, optionally versioned (e.g. "2301.07041v2").
    pub arxiv_id: String,

    /// Paper title, whitespace collapsed.
    pub title: String,

    /// Author names in feed order.
    #[serde(default)]
    pub authors: Vec<String>,

    /// Abstract text, whitespace collapsed.
    #[serde(default)]
    pub r#abstract: String,

    /// First-version publication timestamp (RFC 3339).
    pub published: String,

    /// Latest-version timestamp (RFC 3339).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,

    /// Category terms, deduplicated, in feed order.
    #[serde(default)]
    pub categories: Vec<String>,

    /// Primary category term.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_category: Option<String>,

    /// Link to the PDF.
    pub pdf_url: String,

    /// Author comment (page counts, venues...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Journal reference, when published.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal_ref: Option<String>,

    /// DOI of the published version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
}

impl PaperRecord {
    /// Get author names as a comma-separated string.
    #[must_use]
    pub fn author_names(&self) -> String {
        self.authors.join(", ")
    }

    /// Get categories as a comma-separated string.
    #[must_use]
    pub fn category_list(&self) -> String {
        self.categories.join(", ")
    }
}
