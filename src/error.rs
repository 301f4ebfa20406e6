use thiserror::Error;

/// Main error type for Twitter API operations
#[derive(Debug, Error)]
pub enum TwitterError {
    /// The API answered with a status other than 200
    #[error("Code:{status} Response:{body}")]
    Api { status: u16, body: String },

    /// A required configuration field was absent or empty
    #[error("missing required configuration: {0}")]
    MissingConfig(&'static str),

    /// A signed header value could not be turned into an HTTP header
    #[error("invalid header value: {0}")]
    InvalidHeader(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TwitterError {
    /// Create a new API error from a status code and raw body
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        TwitterError::Api {
            status,
            body: body.into(),
        }
    }

    /// Check if this error is an unauthorized error (401)
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, TwitterError::Api { status: 401, .. })
    }

    /// Check if this error is a not found error (404)
    pub fn is_not_found(&self) -> bool {
        matches!(self, TwitterError::Api { status: 404, .. })
    }

    /// Get the HTTP status code if this is an API error
    pub fn status_code(&self) -> Option<u16> {
        match self {
            TwitterError::Api { status, .. } => Some(*status),
            TwitterError::Reqwest(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type for Twitter operations
pub type Result<T> = std::result::Result<T, TwitterError>;
