//! # docrank-search
//!
//! Keyword-driven document search with similarity ranking.
//!
//! Given free-form text, the pipeline removes stopwords, extracts keyword
//! phrases, queries an external document-search API once per keyword,
//! merges the returned documents by title, and ranks them by how close
//! their titles are to the keyword set.
//!
//! ## Design
//!
//! - Collaborators (search client, phrase extractor, stopword list) are
//!   injected into [`DocumentSearch`] at construction; there is no global state
//! - Keyword queries run concurrently and are merged in keyword order
//! - Ranking fits a TF-IDF space on the keywords and sums cosine distances
//!   from each title to its nearest keywords (lower is better)
//! - A missing stopword resource degrades to plain normalisation
//!
//! ## Security
//!
//! - The API key is read from the environment and never logged
//! - Keywords are logged only at debug/trace level

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod orchestrator;
pub mod providers;
pub mod text;
pub mod types;

pub use client::SearchClient;
pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use orchestrator::DocumentSearch;
pub use providers::MetaphorClient;
pub use text::{PhraseExtractor, StopwordFilter, TextRankExtractor};
pub use types::{CandidateDocument, RankedResult, SearchQueryOptions};

/// The production pipeline: Metaphor search with TextRank keywords.
pub type DefaultDocumentSearch = DocumentSearch<MetaphorClient, TextRankExtractor>;

/// Build the production pipeline, reading the API key from the environment.
///
/// # Errors
///
/// Returns [`SearchError::Config`] if the configuration is invalid or the
/// API key variable named by `config.api_key_env` is not set.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> docrank_search::Result<()> {
/// let config = docrank_search::SearchConfig::default();
/// let search = docrank_search::from_env(&config)?;
/// let options = docrank_search::SearchQueryOptions::new().with("num_results", 5);
/// let body = search
///     .search_formatted("machine learning and artificial intelligence", &options)
///     .await?;
/// println!("{body}");
/// # Ok(())
/// # }
/// ```
pub fn from_env(config: &SearchConfig) -> Result<DefaultDocumentSearch> {
    config.validate()?;
    let client = MetaphorClient::from_env(config)?;
    DocumentSearch::new(client, TextRankExtractor::new(), config)
}
