//! Shared HTTP client for search provider requests.
//!
//! Provides a configured [`reqwest::Client`] with the crate's User-Agent,
//! the configured timeout and gzip decompression.

use std::time::Duration;

use crate::config::SearchConfig;
use crate::error::SearchError;

/// User-Agent sent with every provider request.
pub const USER_AGENT: &str = concat!("docrank/", env!("CARGO_PKG_VERSION"));

/// Build a [`reqwest::Client`] configured for search provider requests.
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the client cannot be constructed.
pub fn build_client(config: &SearchConfig) -> Result<reqwest::Client, SearchError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
        .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))
}
