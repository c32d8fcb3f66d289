//! Error types for the docrank-search crate.
//!
//! All errors use stable string messages suitable for display to users
//! and programmatic handling. API keys never appear in error messages.

/// Errors that can occur while running the keyword-to-ranked-results pipeline.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Phrase extraction produced no keywords for the given text.
    #[error("no keywords could be extracted from the input text")]
    EmptyExtraction,

    /// A recognised query option had an unusable value.
    #[error("invalid option: {0}")]
    InvalidOption(String),

    /// An HTTP request to the search provider failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The search provider answered with a non-success status.
    #[error("search provider returned {status}: {body}")]
    Provider {
        /// HTTP status code returned by the provider.
        status: u16,
        /// Response body, as far as it could be read.
        body: String,
    },

    /// Failed to decode the search provider's response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid search configuration or missing credentials.
    #[error("config error: {0}")]
    Config(String),
}

impl SearchError {
    /// Returns `true` when the error was caused by the caller's input
    /// rather than by a collaborator.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidOption(_))
    }
}

/// Convenience type alias for docrank-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
