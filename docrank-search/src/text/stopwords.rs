//! Stopword removal ahead of phrase extraction.
//!
//! The filter lowercases the input, collapses newlines to spaces and drops
//! every whitespace-separated token that a binary search over the sorted
//! stopword list matches. A probed entry matches when the token *starts
//! with* it, so tokens that merely begin with a probed stopword (`another`
//! against `an`) are dropped too.
//!
//! When the stopword resource cannot be loaded the filter runs in degraded
//! mode and only applies the case and newline normalisation.

use std::path::Path;

use crate::config::SearchConfig;

/// Removes stopwords from free-form text.
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    /// Lexicographically sorted stopword list.
    stopwords: Vec<String>,
    degraded: bool,
}

impl StopwordFilter {
    /// Build a filter from an arbitrary word list.
    ///
    /// An empty list counts as an unavailable resource.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut stopwords: Vec<String> = words
            .into_iter()
            .map(Into::into)
            .map(|w| w.trim().to_owned())
            .filter(|w| !w.is_empty())
            .collect();
        stopwords.sort_unstable();
        let degraded = stopwords.is_empty();
        Self {
            stopwords,
            degraded,
        }
    }

    /// Filter backed by the built-in NLTK English stopword list.
    pub fn builtin() -> Self {
        Self::from_words(stop_words::get(stop_words::LANGUAGE::English))
    }

    /// Load a newline-separated stopword file (one word per line).
    ///
    /// A missing, unreadable or empty file yields a degraded filter.
    pub fn from_file(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let filter = Self::from_words(content.lines());
                if filter.degraded {
                    tracing::warn!(
                        path = %path.display(),
                        "stopword file is empty, stopword removal disabled"
                    );
                }
                filter
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "stopword file unavailable, stopword removal disabled"
                );
                Self::degraded()
            }
        }
    }

    /// Filter from `config.stopwords_path`, or the built-in list when unset.
    pub fn from_config(config: &SearchConfig) -> Self {
        match config.stopwords_path {
            Some(ref path) => Self::from_file(path),
            None => Self::builtin(),
        }
    }

    /// A filter with no stopword resource: normalisation only.
    pub fn degraded() -> Self {
        Self {
            stopwords: Vec::new(),
            degraded: true,
        }
    }

    /// Whether the stopword resource was unavailable.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Number of loaded stopwords.
    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    /// Returns `true` when no stopwords are loaded.
    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }

    /// Binary search with a prefix test at every probe.
    ///
    /// Probe positions follow an inclusive-bounds search (`mid = (lo + hi) / 2`)
    /// so the set of entries tested for each token is fixed by the list alone.
    pub fn is_stopword(&self, token: &str) -> bool {
        let mut start = 0usize;
        // exclusive upper bound
        let mut stop = self.stopwords.len();
        while start < stop {
            let middle = (start + stop - 1) / 2;
            let entry = self.stopwords[middle].as_str();
            if token.starts_with(entry) {
                return true;
            }
            if entry < token {
                start = middle + 1;
            } else {
                stop = middle;
            }
        }
        false
    }

    /// Lowercase, collapse newlines and drop stopword tokens.
    pub fn filter(&self, text: &str) -> String {
        let normalised = text.replace('\n', " ").to_lowercase();
        if self.degraded {
            return normalised;
        }
        normalised
            .split_whitespace()
            .filter(|token| !self.is_stopword(token))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
