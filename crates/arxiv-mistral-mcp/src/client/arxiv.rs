//! arXiv query API client.
//!
//! Requests are spaced at least `arxiv_request_spacing` apart, as arXiv asks of
//! API users. Responses are Atom feeds parsed by [`super::parse_atom_feed`].

use std::sync::{Arc, LazyLock};
use std::time::{Duration, Instant};

use regex::Regex;
use reqwest_middleware::ClientWithMiddleware;
use tokio::sync::Mutex;

use super::{PaperCatalog, build_http_client, check_status, parse_atom_feed, send_error};
use crate::config::{Config, limits};
use crate::error::{ClientError, ClientResult};
use crate::models::{PaperRecord, SortBy};

/// New-style identifiers: `2301.07041`, `2301.07041v2`, `0704.0001`.
static NEW_STYLE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}\.\d{4,5}(v\d+)?$").expect("valid regex"));

/// Old-style identifiers: `math/0104020`, `math.GT/0104020v1`, `hep-th/9901001`.
static OLD_STYLE_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z]+(-[a-z]+)?(\.[A-Z]{2})?/\d{7}(v\d+)?$").expect("valid regex")
});

/// Reduce an identifier to its bare accession number.
///
/// Accepts `arXiv:` prefixes and `arxiv.org/abs/` or `arxiv.org/pdf/` URLs. The
/// version suffix is kept, since it selects a distinct revision.
///
/// # Errors
///
/// Returns [`ClientError::BadRequest`] if the result is not an arXiv identifier.
pub fn normalize_id(raw: &str) -> ClientResult<String> {
    let mut id = raw.trim();

    for marker in ["/abs/", "/pdf/"] {
        if let Some((_, rest)) = id.split_once(marker) {
            id = rest;
        }
    }
    if id.get(..6).is_some_and(|prefix| prefix.eq_ignore_ascii_case("arxiv:")) {
        id = &id[6..];
    }
    let id = id.trim().trim_end_matches(".pdf").trim_end_matches('/');

    if NEW_STYLE_ID.is_match(id) || OLD_STYLE_ID.is_match(id) {
        Ok(id.to_string())
    } else {
        Err(ClientError::bad_request(format!("invalid arXiv identifier: '{}'", raw.trim())))
    }
}

/// arXiv API client.
#[derive(Clone)]
pub struct ArxivClient {
    /// HTTP client with middleware.
    client: ClientWithMiddleware,

    /// Query endpoint.
    api_url: String,

    /// Minimum spacing between requests.
    request_spacing: Duration,

    /// Per-request timeout, reported when a request runs out of time.
    request_timeout: Duration,

    /// When the previous request was sent.
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl ArxivClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            "application/atom+xml, application/xml;q=0.9, text/xml;q=0.8"
                .parse()
                .expect("valid accept header"),
        );

        Ok(Self {
            client: build_http_client(config, headers)?,
            api_url: config.arxiv_api_url.clone(),
            request_spacing: config.arxiv_request_spacing,
            request_timeout: config.request_timeout,
            last_request: Arc::new(Mutex::new(None)),
        })
    }

    /// Search papers.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or a malformed feed.
    pub async fn search_papers(
        &self,
        query: &str,
        max_results: u32,
        sort: SortBy,
    ) -> ClientResult<Vec<PaperRecord>> {
        let max_results = max_results.clamp(1, limits::MAX_SEARCH_RESULTS);
        let params = vec![
            ("search_query".to_string(), query.to_string()),
            ("start".to_string(), "0".to_string()),
            ("max_results".to_string(), max_results.to_string()),
            ("sortBy".to_string(), sort.as_api_param().to_string()),
            ("sortOrder".to_string(), "descending".to_string()),
        ];

        let papers = self.get_feed(&params).await?;
        tracing::debug!(query, count = papers.len(), "arXiv search complete");
        Ok(papers)
    }

    /// Get a single paper by normalized identifier.
    ///
    /// The returned record is keyed by the identifier asked for, so later
    /// lookups of the same id hit the store.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] when arXiv has no such paper.
    pub async fn get_paper(&self, arxiv_id: &str) -> ClientResult<PaperRecord> {
        let params = vec![
            ("id_list".to_string(), arxiv_id.to_string()),
            ("max_results".to_string(), "1".to_string()),
        ];

        let mut paper = self
            .get_feed(&params)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::not_found(format!("arXiv paper {arxiv_id}")))?;

        // arXiv answers unknown new-style ids with an entry lacking id and title.
        if paper.title.is_empty() && paper.arxiv_id.is_empty() {
            return Err(ClientError::not_found(format!("arXiv paper {arxiv_id}")));
        }

        paper.arxiv_id = arxiv_id.to_string();
        Ok(paper)
    }

    /// Make a GET request against the query endpoint and parse the feed.
    async fn get_feed(&self, params: &[(String, String)]) -> ClientResult<Vec<PaperRecord>> {
        self.wait_for_slot().await;

        let response = self
            .client
            .get(&self.api_url)
            .query(params)
            .send()
            .await
            .map_err(|e| send_error(e, self.request_timeout))?;
        let response = check_status(response).await?;
        let body = response.text().await?;

        parse_atom_feed(&body)
    }

    /// Sleep until `request_spacing` has passed since the previous request.
    async fn wait_for_slot(&self) {
        if self.request_spacing.is_zero() {
            return;
        }

        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.request_spacing {
                tokio::time::sleep(self.request_spacing - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}

#[async_trait::async_trait]
impl PaperCatalog for ArxivClient {
    async fn search(
        &self,
        query: &str,
        max_results: u32,
        sort: SortBy,
    ) -> ClientResult<Vec<PaperRecord>> {
        self.search_papers(query, max_results, sort).await
    }

    async fn fetch_by_id(&self, arxiv_id: &str) -> ClientResult<PaperRecord> {
        self.get_paper(arxiv_id).await
    }
}

impl std::fmt::Debug for ArxivClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArxivClient").field("api_url", &self.api_url).finish()
    }
}
