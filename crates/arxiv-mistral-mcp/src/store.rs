//! Paper store: every paper seen by search or lookup, keyed by arXiv id.
//!
//! Entries live for the life of the process. There is no TTL and no capacity
//! bound. Records are shared as `Arc<PaperRecord>` and never mutated in place;
//! a later fetch of the same id replaces the entry wholesale.

use std::sync::Arc;

use moka::future::Cache;

use crate::models::PaperRecord;

/// Process-lifetime paper cache.
///
/// Cloning yields another handle to the same store.
#[derive(Clone)]
pub struct PaperStore {
    papers: Cache<String, Arc<PaperRecord>>,
}

impl PaperStore {
    /// Create an empty, unbounded store.
    #[must_use]
    pub fn new() -> Self {
        Self { papers: Cache::builder().build() }
    }

    /// Look up a paper by identifier.
    pub async fn get(&self, arxiv_id: &str) -> Option<Arc<PaperRecord>> {
        self.papers.get(arxiv_id).await
    }

    /// Store a paper under its own identifier, replacing any previous entry.
    pub async fn put(&self, paper: PaperRecord) -> Arc<PaperRecord> {
        let paper = Arc::new(paper);
        self.papers.insert(paper.arxiv_id.clone(), Arc::clone(&paper)).await;
        paper
    }

    /// Check whether an identifier is stored.
    #[must_use]
    pub fn contains(&self, arxiv_id: &str) -> bool {
        self.papers.contains_key(arxiv_id)
    }
}

impl Default for PaperStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PaperStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaperStore").field("entries", &self.papers.entry_count()).finish()
    }
}
