//! Configuration for the arXiv / Mistral MCP server.

use std::time::Duration;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// arXiv Atom query endpoint.
    pub const ARXIV_API: &str = "https://export.arxiv.org/api/query";

    /// Mistral API base URL.
    pub const MISTRAL_API: &str = "https://api.mistral.ai";

    /// Default chat completion model.
    pub const DEFAULT_MODEL: &str = "mistral-large-latest";

    /// Agent id shipped as a default by older clients. It never names a real
    /// agent, so it selects the chat-completion path.
    pub const PLACEHOLDER_AGENT_ID: &str = "ag:01234567-89ab-cdef-0123-456789abcdef";

    /// Request timeout. Model completions on long prompts can be slow.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Minimum spacing between arXiv requests (arXiv asks for 3s between calls).
    pub const ARXIV_REQUEST_SPACING: Duration = Duration::from_secs(3);

    /// Retries for transient upstream failures.
    pub const MAX_RETRIES: u32 = 3;

    /// Maximum keepalive connections.
    pub const MAX_KEEPALIVE: usize = 10;

    /// Keepalive expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);

    /// User agent sent to both upstreams.
    pub const USER_AGENT: &str = concat!("arxiv-mistral-mcp/", env!("CARGO_PKG_VERSION"));
}

/// Prompt size limits, in characters.
pub mod limits {
    /// Abstract length used in single-paper analysis prompts.
    pub const ANALYSIS_ABSTRACT_CHARS: usize = 2000;

    /// Abstract length per paper in chat context.
    pub const CHAT_ABSTRACT_CHARS: usize = 500;

    /// Upper bound for `max_results` on search.
    pub const MAX_SEARCH_RESULTS: u32 = 100;
}

/// Server configuration.
#[derive(Clone)]
pub struct Config {
    /// Mistral API key. Analysis and chat tools are unavailable without it.
    pub mistral_api_key: Option<String>,

    /// Default model for chat completions.
    pub model: String,

    /// Default Mistral agent id (optional).
    pub agent_id: Option<String>,

    /// arXiv query endpoint (for testing with mock servers).
    pub arxiv_api_url: String,

    /// Mistral base URL (for testing with mock servers).
    pub mistral_api_url: String,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Minimum spacing between arXiv requests.
    pub arxiv_request_spacing: Duration,

    /// Retries for transient failures.
    pub max_retries: u32,
}

impl Config {
    /// Create a new configuration with an optional Mistral API key.
    #[must_use]
    pub fn new(mistral_api_key: Option<String>) -> Self {
        Self {
            mistral_api_key: mistral_api_key.filter(|k| !k.trim().is_empty()),
            model: api::DEFAULT_MODEL.to_string(),
            agent_id: None,
            arxiv_api_url: api::ARXIV_API.to_string(),
            mistral_api_url: api::MISTRAL_API.to_string(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            arxiv_request_spacing: api::ARXIV_REQUEST_SPACING,
            max_retries: api::MAX_RETRIES,
        }
    }

    /// Create a test configuration pointing both upstreams at a mock server.
    ///
    /// arXiv is served under `/api/query`, Mistral under `/v1/...`.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            mistral_api_key: Some("test-key".to_string()),
            model: "mistral-small-latest".to_string(),
            agent_id: None,
            arxiv_api_url: format!("{}/api/query", base_url),
            mistral_api_url: base_url.to_string(),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            arxiv_request_spacing: Duration::ZERO, // No delay in tests
            max_retries: 0,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `MISTRAL_API_KEY`, `MISTRAL_MODEL` and `MISTRAL_AGENT_ID`.
    ///
    /// # Errors
    ///
    /// Returns error if environment variables are invalid.
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::new(std::env::var("MISTRAL_API_KEY").ok());
        if let Ok(model) = std::env::var("MISTRAL_MODEL") {
            config.model = model;
        }
        config.set_agent_id(std::env::var("MISTRAL_AGENT_ID").ok());
        config.validate()?;
        Ok(config)
    }

    /// Set the default agent id. Blank ids count as unset.
    pub fn set_agent_id(&mut self, agent_id: Option<String>) {
        self.agent_id = agent_id.filter(|id| !id.trim().is_empty());
    }

    /// Set the request timeout. The connect timeout never exceeds it.
    pub fn set_request_timeout(&mut self, timeout: Duration) {
        self.request_timeout = timeout;
        self.connect_timeout = self.connect_timeout.min(timeout);
    }

    /// Check that URLs parse and the model name is usable.
    ///
    /// # Errors
    ///
    /// Returns error describing the first invalid setting.
    pub fn validate(&self) -> anyhow::Result<()> {
        url::Url::parse(&self.arxiv_api_url)
            .map_err(|e| anyhow::anyhow!("invalid arXiv API URL '{}': {e}", self.arxiv_api_url))?;
        url::Url::parse(&self.mistral_api_url).map_err(|e| {
            anyhow::anyhow!("invalid Mistral API URL '{}': {e}", self.mistral_api_url)
        })?;
        if self.model.trim().is_empty() {
            anyhow::bail!("model name cannot be empty");
        }
        Ok(())
    }

    /// Check if a Mistral API key is configured.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.mistral_api_key.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("has_api_key", &self.has_api_key())
            .field("model", &self.model)
            .field("agent_id", &self.agent_id)
            .field("arxiv_api_url", &self.arxiv_api_url)
            .field("mistral_api_url", &self.mistral_api_url)
            .field("request_timeout", &self.request_timeout)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}
