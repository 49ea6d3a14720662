//! Mistral completions client.
//!
//! Two endpoints are used: `/v1/chat/completions` for a plain model and
//! `/v1/agents/completions` for a pre-configured agent. Both return the same
//! choice structure.

use std::time::Duration;

use reqwest_middleware::ClientWithMiddleware;
use serde_json::{Value, json};

use super::{LanguageModel, build_http_client, check_status, send_error};
use crate::config::Config;
use crate::error::{ClientError, ClientResult};
use crate::models::ChatTurn;

/// Which Mistral backend answers a completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionTarget {
    /// A configured agent, addressed by id.
    Agent {
        /// Agent identifier (`ag:...`).
        agent_id: String,
    },
    /// A plain chat model.
    Model {
        /// Model name, e.g. `mistral-large-latest`.
        model: String,
    },
}

impl CompletionTarget {
    /// Agent id for result payloads, if this target is an agent.
    #[must_use]
    pub fn agent_id(&self) -> Option<&str> {
        match self {
            Self::Agent { agent_id } => Some(agent_id),
            Self::Model { .. } => None,
        }
    }

    /// Model name for result payloads, if this target is a plain model.
    #[must_use]
    pub fn model(&self) -> Option<&str> {
        match self {
            Self::Agent { .. } => None,
            Self::Model { model } => Some(model),
        }
    }
}

/// Mistral API client.
#[derive(Clone)]
pub struct MistralClient {
    /// HTTP client with middleware.
    client: ClientWithMiddleware,

    /// API key (optional).
    api_key: Option<String>,

    /// Base URL.
    api_url: String,

    /// Per-request timeout, reported when a completion runs out of time.
    request_timeout: Duration,
}

impl MistralClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails or the key is not a
    /// valid header value.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            "application/json".parse().expect("valid accept header"),
        );

        if let Some(ref key) = config.mistral_api_key {
            headers.insert(reqwest::header::AUTHORIZATION, format!("Bearer {key}").parse()?);
        }

        Ok(Self {
            client: build_http_client(config, headers)?,
            api_key: config.mistral_api_key.clone(),
            api_url: config.mistral_api_url.trim_end_matches('/').to_string(),
            request_timeout: config.request_timeout,
        })
    }

    /// Check if an API key is configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Run a completion and return the text of the first choice.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingApiKey`] without sending anything when no
    /// key is configured. A 429 maps to [`ClientError::RateLimited`].
    pub async fn create_completion(
        &self,
        messages: &[ChatTurn],
        target: &CompletionTarget,
    ) -> ClientResult<String> {
        if !self.has_api_key() {
            return Err(ClientError::MissingApiKey);
        }

        let (url, body) = match target {
            CompletionTarget::Agent { agent_id } => (
                format!("{}/v1/agents/completions", self.api_url),
                json!({ "agent_id": agent_id, "messages": messages }),
            ),
            CompletionTarget::Model { model } => (
                format!("{}/v1/chat/completions", self.api_url),
                json!({ "model": model, "messages": messages }),
            ),
        };

        tracing::debug!(url = %url, turns = messages.len(), "Requesting completion");

        let body_str = serde_json::to_string(&body)?;
        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .body(body_str)
            .send()
            .await
            .map_err(|e| send_error(e, self.request_timeout))?;

        let response = check_status(response).await?;
        let payload: Value = response.json().await?;

        extract_text(&payload)
    }
}

/// Pull the first choice's text out of a completion payload.
///
/// `content` is either a string or a list of chunks whose `text` fields are
/// concatenated.
fn extract_text(payload: &Value) -> ClientResult<String> {
    let content = &payload["choices"][0]["message"]["content"];

    let text = match content {
        Value::String(s) => s.clone(),
        Value::Array(chunks) => chunks
            .iter()
            .filter_map(|chunk| chunk.get("text").and_then(Value::as_str))
            .collect::<String>(),
        _ => String::new(),
    };

    if text.trim().is_empty() { Err(ClientError::EmptyCompletion) } else { Ok(text) }
}

#[async_trait::async_trait]
impl LanguageModel for MistralClient {
    fn is_configured(&self) -> bool {
        self.has_api_key()
    }

    async fn complete(
        &self,
        messages: &[ChatTurn],
        target: &CompletionTarget,
    ) -> ClientResult<String> {
        self.create_completion(messages, target).await
    }
}

impl std::fmt::Debug for MistralClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MistralClient")
            .field("api_url", &self.api_url)
            .field("has_api_key", &self.api_key.is_some())
            .finish()
    }
}
