//! Core document search: extract keywords, fan out, merge, rank, format.
//!
//! [`DocumentSearch`] owns its collaborators (search client, phrase
//! extractor, stopword filter) and is immutable after construction, so
//! one instance can serve every request concurrently.

use futures::StreamExt;

use crate::client::SearchClient;
use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::text::{PhraseExtractor, StopwordFilter};
use crate::types::{RankedResult, SearchQueryOptions};

use super::dedup::MergedDocuments;
use super::format::format_results;
use super::ranking::SimilarityRanker;

/// Keyword-to-ranked-results pipeline.
pub struct DocumentSearch<C, P> {
    client: C,
    extractor: P,
    stopwords: StopwordFilter,
    ranker: SimilarityRanker,
    max_concurrent_queries: usize,
}

impl<C, P> std::fmt::Debug for DocumentSearch<C, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentSearch")
            .field("stopwords", &self.stopwords.len())
            .field("stopwords_degraded", &self.stopwords.is_degraded())
            .field("default_limit", &self.ranker.default_limit())
            .field("max_concurrent_queries", &self.max_concurrent_queries)
            .finish_non_exhaustive()
    }
}

impl<C, P> DocumentSearch<C, P>
where
    C: SearchClient,
    P: PhraseExtractor,
{
    /// Assemble the pipeline from its collaborators.
    ///
    /// The stopword filter is loaded from `config.stopwords_path` (or the
    /// built-in list); an unavailable resource leaves it degraded.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if `config` is invalid.
    pub fn new(client: C, extractor: P, config: &SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let stopwords = StopwordFilter::from_config(config);
        if stopwords.is_degraded() {
            tracing::warn!("running without stopword removal");
        }
        Ok(Self {
            client,
            extractor,
            stopwords,
            ranker: SimilarityRanker::new(config.default_num_results),
            max_concurrent_queries: config.max_concurrent_queries,
        })
    }

    /// Replace the stopword filter.
    pub fn with_stopwords(mut self, stopwords: StopwordFilter) -> Self {
        self.stopwords = stopwords;
        self
    }

    /// The active stopword filter.
    pub fn stopwords(&self) -> &StopwordFilter {
        &self.stopwords
    }

    /// Remove stopwords and extract keyword phrases.
    pub fn extract_keywords(&self, text: &str) -> Vec<String> {
        let filtered = self.stopwords.filter(text);
        self.extractor.extract(&filtered)
    }

    /// Run the full pipeline and return ranked documents.
    ///
    /// # Errors
    ///
    /// - [`SearchError::InvalidOption`] if `num_results` is not a
    ///   non-negative integer
    /// - [`SearchError::EmptyExtraction`] if no keywords were extracted
    /// - any error from the search client; one failing keyword query fails
    ///   the whole search
    pub async fn search(
        &self,
        text: &str,
        options: &SearchQueryOptions,
    ) -> Result<Vec<RankedResult>, SearchError> {
        let num_results = options.num_results()?;

        let keywords = self.extract_keywords(text);
        if keywords.is_empty() {
            return Err(SearchError::EmptyExtraction);
        }
        tracing::debug!(count = keywords.len(), ?keywords, "extracted keywords");

        let merged = self.gather(&keywords, options).await?;
        let ranking = self.ranker.rank(&keywords, &merged.titles(), num_results);
        tracing::debug!(
            candidates = merged.len(),
            returned = ranking.len(),
            "ranked candidate documents"
        );

        let documents = merged.documents();
        Ok(ranking
            .into_iter()
            .enumerate()
            .map(|(position, ranked)| RankedResult {
                document: documents[ranked.index].clone(),
                score: ranked.score,
                rank: position + 1,
            })
            .collect())
    }

    /// Run the full pipeline and render the plain-text response body.
    ///
    /// # Errors
    ///
    /// Same as [`search`](Self::search).
    pub async fn search_formatted(
        &self,
        text: &str,
        options: &SearchQueryOptions,
    ) -> Result<String, SearchError> {
        let results = self.search(text, options).await?;
        Ok(format_results(&results))
    }

    /// Query every keyword and merge the results in keyword order.
    ///
    /// Queries run concurrently up to `max_concurrent_queries`; all of them
    /// finish before merging so the last-write-wins order only depends on
    /// keyword order.
    async fn gather(
        &self,
        keywords: &[String],
        options: &SearchQueryOptions,
    ) -> Result<MergedDocuments, SearchError> {
        // Futures are collected up front so the stream holds no closure;
        // keeps the returned future `Send` inside spawned server tasks.
        let queries: Vec<_> = keywords
            .iter()
            .map(|keyword| async move {
                let outcome = self.client.search(keyword, options).await;
                (keyword, outcome)
            })
            .collect();
        let outcomes: Vec<_> = futures::stream::iter(queries)
            .buffered(self.max_concurrent_queries)
            .collect()
            .await;

        let mut merged = MergedDocuments::new();
        for (keyword, outcome) in outcomes {
            match outcome {
                Ok(documents) => {
                    tracing::debug!(
                        provider = self.client.name(),
                        keyword = %keyword,
                        count = documents.len(),
                        "keyword query returned documents"
                    );
                    merged.extend(documents);
                }
                Err(err) => {
                    tracing::warn!(
                        provider = self.client.name(),
                        error = %err,
                        "keyword query failed"
                    );
                    return Err(err);
                }
            }
        }
        Ok(merged)
    }
}
