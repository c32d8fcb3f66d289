//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] controls the external search provider, request timeouts,
//! fan-out width and the stopword resource. It is embedded in the
//! application's TOML configuration under `[search]`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Configuration for the document search pipeline.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Base URL of the document-search API (no trailing `/search`).
    pub base_url: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    /// Search type requested from the provider for every keyword query.
    pub search_type: String,
    /// Number of ranked results returned when the request has no `num_results`.
    pub default_num_results: usize,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// Upper bound on keyword queries in flight at once. `1` queries
    /// keywords strictly one after another.
    pub max_concurrent_queries: usize,
    /// Newline-separated stopword file. `None` uses the built-in English list.
    pub stopwords_path: Option<PathBuf>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.metaphor.systems".to_owned(),
            api_key_env: "METAPHOR_KEY".to_owned(),
            search_type: "keyword".to_owned(),
            default_num_results: 10,
            timeout_seconds: 10,
            max_concurrent_queries: 4,
            stopwords_path: None,
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `default_num_results`, `timeout_seconds` and `max_concurrent_queries`
    ///   must be greater than 0
    /// - `base_url` must be an absolute URL
    /// - `api_key_env` and `search_type` must not be empty
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.default_num_results == 0 {
            return Err(SearchError::Config(
                "default_num_results must be greater than 0".into(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.max_concurrent_queries == 0 {
            return Err(SearchError::Config(
                "max_concurrent_queries must be greater than 0".into(),
            ));
        }
        url::Url::parse(&self.base_url)
            .map_err(|e| SearchError::Config(format!("base_url is not a valid URL: {e}")))?;
        if self.api_key_env.trim().is_empty() {
            return Err(SearchError::Config("api_key_env must not be empty".into()));
        }
        if self.search_type.trim().is_empty() {
            return Err(SearchError::Config("search_type must not be empty".into()));
        }
        Ok(())
    }
}
