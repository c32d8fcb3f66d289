//! Trait definition for the external document-search collaborator.
//!
//! The pipeline issues one [`SearchClient::search`] call per extracted
//! keyword. Implementations own URL construction, authentication and
//! response decoding; the pipeline only sees [`CandidateDocument`] lists.

use crate::error::SearchError;
use crate::types::{CandidateDocument, SearchQueryOptions};

/// An opaque keyword-query service returning candidate documents.
///
/// Results carry no guaranteed ordering. Titles may contain HTML markup;
/// the pipeline strips it before deduplication.
///
/// All implementations must be `Send + Sync` for concurrent keyword queries.
pub trait SearchClient: Send + Sync {
    /// Search for documents matching a single keyword.
    ///
    /// # Arguments
    ///
    /// * `keyword`: One extracted keyword phrase.
    /// * `options`: Pass-through options forwarded verbatim to the provider.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the request fails, the provider rejects
    /// it, or the response cannot be decoded.
    fn search(
        &self,
        keyword: &str,
        options: &SearchQueryOptions,
    ) -> impl std::future::Future<Output = Result<Vec<CandidateDocument>, SearchError>> + Send;

    /// Short provider name used in logs.
    fn name(&self) -> &'static str;
}
