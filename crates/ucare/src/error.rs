//! Error types.

/// Errors returned by file and group handles and by the REST client.
#[derive(Debug, thiserror::Error)]
pub enum UcareError {
    /// Malformed identifier, failed precondition or bad argument combination
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A polling loop ran past its deadline
    #[error("Timed out: {0}")]
    Timeout(String),

    /// HTTP transport error or non-success status
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body is not the expected JSON shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// Required configuration key is not set
    #[error("Missing configuration: {0}")]
    MissingConfig(&'static str),
}

impl UcareError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        UcareError::InvalidRequest(message.into())
    }

    pub fn is_invalid_request(&self) -> bool {
        matches!(self, UcareError::InvalidRequest(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, UcareError::Timeout(_))
    }
}

pub type Result<T, E = UcareError> = std::result::Result<T, E>;
