//! Nearest-keyword similarity ranking.
//!
//! The keyword list defines the vector space: a TF-IDF space is fitted on
//! the keywords alone and every candidate title is projected into it. A
//! title's score is the sum of its cosine distances to its `k` nearest
//! keywords, where `k = max(1, min(keywords, titles))`. Lower scores rank
//! first; equal scores keep insertion order.

use super::tfidf::{cosine_distance, TfidfSpace};

/// Result cap used when neither the request nor the config sets one.
pub const DEFAULT_NUM_RESULTS: usize = 10;

/// A title position together with its aggregate distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedTitle {
    /// Index of the title in the slice passed to [`SimilarityRanker::rank`].
    pub index: usize,
    /// Sum of distances to the nearest keywords.
    pub score: f64,
}

/// Number of nearest keywords summed per title.
pub fn neighbor_count(keywords: usize, titles: usize) -> usize {
    keywords.min(titles).max(1)
}

/// Ranks titles by aggregate distance to a keyword set.
#[derive(Debug, Clone, Copy)]
pub struct SimilarityRanker {
    default_limit: usize,
}

impl Default for SimilarityRanker {
    fn default() -> Self {
        Self::new(DEFAULT_NUM_RESULTS)
    }
}

impl SimilarityRanker {
    /// Create a ranker that keeps `default_limit` titles unless told otherwise.
    pub fn new(default_limit: usize) -> Self {
        Self { default_limit }
    }

    /// The cap applied when [`rank`](Self::rank) gets no explicit limit.
    pub fn default_limit(&self) -> usize {
        self.default_limit
    }

    /// Rank `titles` against `keywords`, keeping at most `limit` titles
    /// (or the default limit when `None`).
    ///
    /// An empty title list yields an empty ranking.
    pub fn rank<K, T>(&self, keywords: &[K], titles: &[T], limit: Option<usize>) -> Vec<RankedTitle>
    where
        K: AsRef<str>,
        T: AsRef<str>,
    {
        if titles.is_empty() {
            return Vec::new();
        }

        let space = TfidfSpace::fit(keywords);
        let keyword_vectors: Vec<Vec<f64>> = keywords
            .iter()
            .map(|keyword| space.transform(keyword.as_ref()))
            .collect();
        let k = neighbor_count(keywords.len(), titles.len());

        let mut ranked: Vec<RankedTitle> = titles
            .iter()
            .enumerate()
            .map(|(index, title)| {
                let title_vector = space.transform(title.as_ref());
                let mut distances: Vec<f64> = keyword_vectors
                    .iter()
                    .map(|keyword_vector| cosine_distance(&title_vector, keyword_vector))
                    .collect();
                distances.sort_by(f64::total_cmp);
                RankedTitle {
                    index,
                    score: distances.iter().take(k).sum(),
                }
            })
            .collect();

        // stable: ties keep insertion order
        ranked.sort_by(|a, b| a.score.total_cmp(&b.score));
        ranked.truncate(limit.unwrap_or(self.default_limit));
        ranked
    }
}
