//! Error types for the SerpApi client

use thiserror::Error;

/// Result type alias for client operations
pub type SerpResult<T> = std::result::Result<T, SerpError>;

/// Every way a call against the search service can fail
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SerpError {
    /// No API key could be resolved, or the client is misconfigured
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Invalid input parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The service could not be reached
    #[error("HTTP request failed: {message}")]
    HttpError {
        message: String,
        status_code: Option<u16>,
    },

    /// Timeout error
    #[error("Request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// The body is not the JSON (or text) that was expected
    #[error("Failed to decode response: {0}")]
    DecodeError(String),

    /// The service answered, but reported an error inside the body.
    ///
    /// The message is the service's text, untouched.
    #[error("{0}")]
    ApiError(String),

    /// A key looked up on a response tree does not exist
    #[error("Missing field `{0}`")]
    MissingField(String),

    /// A value in a response tree is not of the asserted type
    #[error("Unexpected shape at `{path}`: expected {expected}, found {found}")]
    UnexpectedShape {
        path: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl SerpError {
    /// Whether the service itself rejected the request
    pub fn is_api_error(&self) -> bool {
        matches!(self, SerpError::ApiError(_))
    }
}

impl From<serde_json::Error> for SerpError {
    fn from(error: serde_json::Error) -> Self {
        SerpError::DecodeError(format!("JSON parsing failed: {error}"))
    }
}

impl From<url::ParseError> for SerpError {
    fn from(error: url::ParseError) -> Self {
        SerpError::ConfigError(format!("Invalid URL: {error}"))
    }
}
