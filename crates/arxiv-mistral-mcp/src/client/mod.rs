//! Upstream API clients.
//!
//! Two external collaborators sit behind traits so the tool layer can run
//! against the real HTTP clients or against test doubles:
//! - [`PaperCatalog`]: arXiv search and single-paper lookup
//! - [`LanguageModel`]: Mistral chat/agent completions
//!
//! Both HTTP clients share one construction path:
//! - Connection pooling via reqwest
//! - Retry middleware with exponential backoff
//! - Request and connect timeouts

mod arxiv;
mod atom;
mod mistral;

pub use arxiv::{ArxivClient, normalize_id};
pub use atom::parse_atom_feed;
pub use mistral::{CompletionTarget, MistralClient};

use std::time::Duration;

use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};

use crate::config::{Config, api};
use crate::error::{ClientError, ClientResult};
use crate::models::{ChatTurn, PaperRecord, SortBy};

/// Paper catalog (arXiv).
#[async_trait::async_trait]
pub trait PaperCatalog: Send + Sync {
    /// Keyword search. An empty vector means the query matched nothing.
    async fn search(
        &self,
        query: &str,
        max_results: u32,
        sort: SortBy,
    ) -> ClientResult<Vec<PaperRecord>>;

    /// Look up a single paper by normalized identifier.
    async fn fetch_by_id(&self, arxiv_id: &str) -> ClientResult<PaperRecord>;
}

/// Hosted language model (Mistral).
#[async_trait::async_trait]
pub trait LanguageModel: Send + Sync {
    /// Whether a credential is available. Checked before any request is built.
    fn is_configured(&self) -> bool;

    /// Generate a completion for the ordered messages.
    async fn complete(&self, messages: &[ChatTurn], target: &CompletionTarget)
    -> ClientResult<String>;
}

/// Build the shared HTTP client with retry middleware.
pub(crate) fn build_http_client(
    config: &Config,
    headers: reqwest::header::HeaderMap,
) -> anyhow::Result<ClientWithMiddleware> {
    let client = Client::builder()
        .default_headers(headers)
        .user_agent(api::USER_AGENT)
        .timeout(config.request_timeout)
        .connect_timeout(config.connect_timeout)
        .pool_max_idle_per_host(api::MAX_KEEPALIVE)
        .pool_idle_timeout(api::KEEPALIVE_EXPIRY)
        .gzip(true)
        .build()?;

    let retry_policy = ExponentialBackoff::builder()
        .retry_bounds(Duration::from_secs(1), Duration::from_secs(30))
        .build_with_max_retries(config.max_retries);

    Ok(ClientBuilder::new(client)
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build())
}

/// Classify a failed send, surfacing request timeouts as [`ClientError::Timeout`].
pub(crate) fn send_error(err: reqwest_middleware::Error, timeout: Duration) -> ClientError {
    if is_timeout(&err) { ClientError::Timeout(timeout) } else { ClientError::Middleware(err) }
}

/// The retry middleware wraps the last transport error once it gives up.
fn is_timeout(err: &reqwest_middleware::Error) -> bool {
    match err {
        reqwest_middleware::Error::Reqwest(e) => e.is_timeout(),
        reqwest_middleware::Error::Middleware(e) => e.chain().any(|cause| {
            cause.downcast_ref::<reqwest::Error>().is_some_and(reqwest::Error::is_timeout)
                || cause.downcast_ref::<reqwest_middleware::Error>().is_some_and(is_timeout)
        }),
    }
}

/// Map non-success status codes onto the client error taxonomy.
pub(crate) async fn check_status(response: reqwest::Response) -> ClientResult<reqwest::Response> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    match status.as_u16() {
        429 => {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(60);

            Err(ClientError::rate_limited(retry_after))
        }
        404 => {
            let text = response.text().await.unwrap_or_default();
            Err(ClientError::not_found(text))
        }
        400 => {
            let text = response.text().await.unwrap_or_default();
            Err(ClientError::bad_request(text))
        }
        401 | 403 => {
            let text = response.text().await.unwrap_or_default();
            Err(ClientError::Unauthorized { message: text })
        }
        500..=599 => {
            let text = response.text().await.unwrap_or_default();
            Err(ClientError::server(status.as_u16(), text))
        }
        _ => {
            let text = response.text().await.unwrap_or_default();
            Err(ClientError::UnexpectedStatus { status: status.as_u16(), message: text })
        }
    }
}
