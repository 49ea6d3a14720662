//! Error types for the arXiv / Mistral MCP server.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

use std::time::Duration;

/// Errors from the upstream client layer (arXiv and Mistral).
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Middleware error
    #[error("Middleware error: {0}")]
    Middleware(#[from] reqwest_middleware::Error),

    /// No credential configured for the language-model provider
    #[error("MISTRAL_API_KEY not configured")]
    MissingApiKey,

    /// Upstream quota exhausted (429 response)
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Suggested wait time before retry
        retry_after: Duration,
    },

    /// Resource not found (404 response or empty feed)
    #[error("Resource not found: {resource}")]
    NotFound {
        /// Description of the missing resource
        resource: String,
    },

    /// Invalid request parameters (400 response or rejected identifier)
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message
        message: String,
    },

    /// Credential rejected (401/403 response)
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Error message from API
        message: String,
    },

    /// Request timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Malformed Atom feed
    #[error("Malformed arXiv feed: {0}")]
    Xml(String),

    /// Completion response carried no text
    #[error("Model returned an empty completion")]
    EmptyCompletion,

    /// Server error (5xx response)
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },
}

impl ClientError {
    /// Create a rate limited error with retry-after duration.
    #[must_use]
    pub fn rate_limited(seconds: u64) -> Self {
        Self::RateLimited { retry_after: Duration::from_secs(seconds) }
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    /// Create a bad request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }

    /// Create a malformed-feed error.
    #[must_use]
    pub fn xml(message: impl Into<String>) -> Self {
        Self::Xml(message.into())
    }
}

/// Errors from MCP tool execution.
#[derive(thiserror::Error, Debug)]
pub enum ToolError {
    /// Upstream failure, prefixed with what the tool was doing
    #[error("{context}: {source}")]
    Client {
        /// Operation that failed (e.g. "Failed to fetch paper")
        context: &'static str,
        /// Underlying client error
        #[source]
        source: ClientError,
    },

    /// Missing or invalid server configuration
    #[error("{0}")]
    Config(String),

    /// Not enough usable input to run the operation
    #[error("{0}")]
    InsufficientInput(String),

    /// Input validation failed
    #[error("Validation error: {message}")]
    Validation {
        /// Field that failed validation
        field: String,
        /// Validation error message
        message: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ToolError {
    /// Wrap a client error with the operation that produced it.
    #[must_use]
    pub fn client(context: &'static str, source: ClientError) -> Self {
        match source {
            ClientError::MissingApiKey => Self::Config(source.to_string()),
            source => Self::Client { context, source },
        }
    }

    /// Create a validation error.
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation { field: field.into(), message: message.into() }
    }

    /// Create a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an insufficient-input error.
    #[must_use]
    pub fn insufficient_input(message: impl Into<String>) -> Self {
        Self::InsufficientInput(message.into())
    }

    /// Tool-level failures travel back as `{"error": ...}` data in a normal
    /// result. Everything else becomes a JSON-RPC error object.
    #[must_use]
    pub const fn is_reported_as_data(&self) -> bool {
        matches!(self, Self::Client { .. } | Self::Config(_) | Self::InsufficientInput(_))
    }

    /// Convert to a user-friendly error message for MCP response.
    #[must_use]
    pub fn to_user_message(&self) -> String {
        match self {
            Self::Client { context, source: ClientError::RateLimited { retry_after } } => {
                format!(
                    "{context}: rate limited by upstream API. Please wait {:?} before retrying.",
                    retry_after
                )
            }
            Self::Validation { field, message } => {
                format!("Invalid input for '{field}': {message}")
            }
            Self::Serialization(e) => format!("Invalid arguments: {e}"),
            _ => self.to_string(),
        }
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for tool operations.
pub type ToolResult<T> = Result<T, ToolError>;
