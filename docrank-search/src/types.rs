//! Core types for candidate documents, ranked results and query options.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::SearchError;

/// Name of the query option that caps the final ranked list.
pub const NUM_RESULTS_OPTION: &str = "num_results";

/// A document returned by the external search provider for one keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateDocument {
    /// Document title. After merging this is the title with markup stripped.
    pub title: String,
    /// Document URL.
    pub url: String,
    /// Provider-assigned document identifier.
    pub id: String,
    /// Author, when the provider knows it.
    pub author: Option<String>,
    /// Publication date as an ISO-8601-like string.
    pub published_date: Option<String>,
}

/// A candidate document with its relevance score and rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    /// The ranked document.
    pub document: CandidateDocument,
    /// Sum of cosine distances to the nearest keywords (lower is more similar).
    pub score: f64,
    /// 1-based position in the final ranking.
    pub rank: usize,
}

/// Pass-through options forwarded verbatim to the search provider.
///
/// Only `num_results` is interpreted by the pipeline itself; every other
/// key (domain filters, date ranges, ...) is opaque.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchQueryOptions(Map<String, Value>);

impl SearchQueryOptions {
    /// Create an empty option bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option, returning `self` for chaining.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Look up a raw option value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Iterate over all options.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Returns `true` when no options are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The requested result cap, if any.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidOption`] when `num_results` is present
    /// but is not a non-negative integer.
    pub fn num_results(&self) -> Result<Option<usize>, SearchError> {
        match self.0.get(NUM_RESULTS_OPTION) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => value
                .as_u64()
                .and_then(|n| usize::try_from(n).ok())
                .map(Some)
                .ok_or_else(|| {
                    SearchError::InvalidOption(format!(
                        "{NUM_RESULTS_OPTION} must be a non-negative integer, got {value}"
                    ))
                }),
        }
    }
}

impl From<Map<String, Value>> for SearchQueryOptions {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
