//! Search orchestrator: keyword fan-out, title dedup, ranking, formatting.
//!
//! This module queries the search client once per extracted keyword,
//! merges the returned documents by markup-stripped title, ranks them by
//! TF-IDF cosine distance to the keyword set, and renders the top results.

pub mod dedup;
pub mod format;
pub mod ranking;
pub mod search;
pub mod tfidf;

pub use dedup::MergedDocuments;
pub use ranking::{RankedTitle, SimilarityRanker};
pub use search::DocumentSearch;
