//! Error types for the ghfinder application layer.

use gh_search::SearchError;

/// Top-level error type for ghfinder.
#[derive(Debug, thiserror::Error)]
pub enum FinderError {
    /// GitHub search or profile lookup error.
    #[error(transparent)]
    Search(#[from] SearchError),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Testimonial store request or decode error.
    #[error("reviews error: {0}")]
    Reviews(String),

    /// Rejected user input.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, FinderError>;
