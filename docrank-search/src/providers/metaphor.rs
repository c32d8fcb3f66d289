//! Metaphor (Exa) keyword search client.
//!
//! Issues `POST {base_url}/search` with the keyword as `query`, the
//! configured search type, and every pass-through option with its key
//! converted to camelCase (`num_results` → `numResults`).

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::client::SearchClient;
use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http::build_client;
use crate::types::{CandidateDocument, SearchQueryOptions};

/// Client for the Metaphor search API.
#[derive(Clone)]
pub struct MetaphorClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    search_type: String,
}

impl std::fmt::Debug for MetaphorClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetaphorClient")
            .field("base_url", &self.base_url)
            .field("search_type", &self.search_type)
            .finish_non_exhaustive()
    }
}

impl MetaphorClient {
    /// Create a client with an explicit API key.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the key is empty or the
    /// configuration is invalid, or [`SearchError::Http`] if the HTTP
    /// client cannot be built.
    pub fn new(api_key: impl Into<String>, config: &SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(SearchError::Config("search API key is empty".into()));
        }
        Ok(Self {
            client: build_client(config)?,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            api_key,
            search_type: config.search_type.clone(),
        })
    }

    /// Create a client reading the API key from `config.api_key_env`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the variable is unset or empty.
    pub fn from_env(config: &SearchConfig) -> Result<Self, SearchError> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            SearchError::Config(format!(
                "environment variable {} is not set",
                config.api_key_env
            ))
        })?;
        Self::new(api_key, config)
    }

    fn endpoint(&self) -> String {
        format!("{}/search", self.base_url)
    }
}

impl SearchClient for MetaphorClient {
    async fn search(
        &self,
        keyword: &str,
        options: &SearchQueryOptions,
    ) -> Result<Vec<CandidateDocument>, SearchError> {
        let body = build_search_request(keyword, &self.search_type, options);
        tracing::trace!(keyword, "sending Metaphor search request");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| SearchError::Http(format!("search request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read body".into());
            return Err(SearchError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let decoded: SearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Parse(format!("invalid search response: {e}")))?;

        Ok(decoded.results.into_iter().map(Into::into).collect())
    }

    fn name(&self) -> &'static str {
        "metaphor"
    }
}

/// Build the JSON body for one keyword query.
///
/// Option keys are converted to camelCase. A `type` option overrides the
/// configured search type; `query` is always the keyword.
pub fn build_search_request(
    keyword: &str,
    search_type: &str,
    options: &SearchQueryOptions,
) -> Value {
    let mut body = Map::new();
    body.insert("type".to_owned(), Value::String(search_type.to_owned()));
    for (key, value) in options.iter() {
        body.insert(snake_to_camel(key), value.clone());
    }
    body.insert("query".to_owned(), Value::String(keyword.to_owned()));
    Value::Object(body)
}

/// Convert a `snake_case` key to `camelCase`.
pub fn snake_to_camel(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper_next = false;
    for c in key.chars() {
        if c == '_' {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<ApiDocument>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiDocument {
    title: Option<String>,
    url: String,
    id: String,
    author: Option<String>,
    published_date: Option<String>,
}

impl From<ApiDocument> for CandidateDocument {
    fn from(doc: ApiDocument) -> Self {
        Self {
            title: doc.title.unwrap_or_default(),
            url: doc.url,
            id: doc.id,
            author: doc.author,
            published_date: doc.published_date,
        }
    }
}
