//! Error types for the docrank service.

use docrank_search::SearchError;

/// Top-level error type for the document search service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Search pipeline error.
    #[error("search error: {0}")]
    Search(#[from] SearchError),

    /// HTTP server error (bind, serve).
    #[error("server error: {0}")]
    Server(String),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, ServiceError>;
