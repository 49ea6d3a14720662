//! Enumeration types for API and tool parameters.

use serde::{Deserialize, Serialize};

/// Sort criterion for arXiv search.
///
/// Deserialization is lenient: unknown values fall back to relevance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum SortBy {
    /// Best match first.
    #[default]
    #[serde(rename = "relevance")]
    Relevance,
    /// Most recently updated first.
    #[serde(rename = "lastUpdatedDate")]
    LastUpdatedDate,
    /// Most recently submitted first.
    #[serde(rename = "submittedDate")]
    SubmittedDate,
}

impl SortBy {
    /// Value of the arXiv `sortBy` query parameter.
    #[must_use]
    pub const fn as_api_param(self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::LastUpdatedDate => "lastUpdatedDate",
            Self::SubmittedDate => "submittedDate",
        }
    }
}

impl From<String> for SortBy {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<&str> for SortBy {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().replace('_', "").as_str() {
            "lastupdateddate" | "lastupdated" | "updated" => Self::LastUpdatedDate,
            "submitteddate" | "submitted" => Self::SubmittedDate,
            _ => Self::Relevance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_by_accepts_api_and_snake_case_names() {
        assert_eq!(SortBy::from("lastUpdatedDate"), SortBy::LastUpdatedDate);
        assert_eq!(SortBy::from("last_updated"), SortBy::LastUpdatedDate);
        assert_eq!(SortBy::from("submittedDate"), SortBy::SubmittedDate);
        assert_eq!(SortBy::from("submitted"), SortBy::SubmittedDate);
        assert_eq!(SortBy::from("relevance"), SortBy::Relevance);
    }

    #[test]
    fn test_sort_by_unknown_falls_back_to_relevance() {
        let sort: SortBy = serde_json::from_value(serde_json::json!("citations")).unwrap();
        assert_eq!(sort, SortBy::Relevance);
    }

    #[test]
    fn test_sort_by_serializes_api_name() {
        let json = serde_json::to_value(SortBy::SubmittedDate).unwrap();
        assert_eq!(json, "submittedDate");
        assert_eq!(SortBy::SubmittedDate.as_api_param(), "submittedDate");
    }
}
