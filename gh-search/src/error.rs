//! Error types for the gh-search crate.
//!
//! All errors carry stable string messages suitable for display to users.
//! Query text is never embedded in error messages.

/// Errors that can occur while talking to the GitHub search API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// An HTTP request could not be sent or its body could not be read.
    #[error("HTTP error: {0}")]
    Http(String),

    /// A request did not complete within the configured timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The API answered with a non-success status code.
    #[error("unexpected status {status}: {message}")]
    Status {
        /// HTTP status code returned by the API.
        status: u16,
        /// Short description of the failing request.
        message: String,
    },

    /// Failed to decode a JSON response body.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Caller-supplied input was rejected before any request was made.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience type alias for gh-search results.
pub type Result<T> = std::result::Result<T, SearchError>;

impl SearchError {
    /// Map a [`reqwest::Error`] into a [`SearchError`], keeping timeouts distinct.
    pub(crate) fn from_reqwest(context: &str, err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(format!("{context}: {err}"))
        } else if let Some(status) = err.status() {
            Self::Status {
                status: status.as_u16(),
                message: context.to_string(),
            }
        } else if err.is_decode() {
            Self::Parse(format!("{context}: {err}"))
        } else {
            Self::Http(format!("{context}: {err}"))
        }
    }
}
