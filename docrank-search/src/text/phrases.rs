//! Keyword phrase extraction.
//!
//! [`PhraseExtractor`] is the seam for the NLP capability: text in, phrases
//! ordered by salience out. [`TextRankExtractor`] is the default backend.
//!
//! Stopwords are already gone by the time text reaches the extractor, so
//! phrase boundaries come from punctuation instead: the text is cut into
//! clauses at sentence and clause marks, and each clause into runs of at
//! most [`DEFAULT_MAX_PHRASE_WORDS`] words. Candidates are then ranked by
//! the mean TextRank score of their words.

use std::cmp::Reverse;
use std::collections::HashSet;
use std::sync::OnceLock;

use keyword_extraction::text_rank::{TextRank, TextRankParams};
use regex::Regex;

/// Longest candidate phrase the default extractor forms.
pub const DEFAULT_MAX_PHRASE_WORDS: usize = 3;

/// Turns text into an ordered list of keyword phrases.
///
/// Implementations must return an empty list for empty input and must not
/// truncate the ranked list.
pub trait PhraseExtractor: Send + Sync {
    /// Extract phrases, most salient first.
    fn extract(&self, text: &str) -> Vec<String>;
}

static CLAUSE_BREAK: OnceLock<Regex> = OnceLock::new();
static WORD: OnceLock<Regex> = OnceLock::new();

fn clause_break() -> &'static Regex {
    CLAUSE_BREAK.get_or_init(|| {
        Regex::new(r#"[.,;:!?()\[\]{}"]+"#).expect("invalid clause regex pattern")
    })
}

fn word() -> &'static Regex {
    WORD.get_or_init(|| Regex::new(r"\w+(?:'\w+)*").expect("invalid word regex pattern"))
}

/// TextRank phrase extractor.
#[derive(Debug, Clone)]
pub struct TextRankExtractor {
    max_phrase_words: usize,
}

impl Default for TextRankExtractor {
    fn default() -> Self {
        Self {
            max_phrase_words: DEFAULT_MAX_PHRASE_WORDS,
        }
    }
}

impl TextRankExtractor {
    /// Create a TextRank extractor with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the longest candidate phrase, in words (at least 1).
    pub fn with_max_phrase_words(mut self, max_phrase_words: usize) -> Self {
        self.max_phrase_words = max_phrase_words.max(1);
        self
    }

    /// Longest candidate phrase, in words.
    pub fn max_phrase_words(&self) -> usize {
        self.max_phrase_words
    }

    /// Candidate phrases in text order, without duplicates.
    fn candidates(&self, text: &str) -> Vec<Vec<String>> {
        let mut seen = HashSet::new();
        let mut candidates = Vec::new();
        for clause in clause_break().split(text) {
            let words: Vec<String> = word()
                .find_iter(clause)
                .map(|m| m.as_str().to_lowercase())
                .collect();
            for chunk in words.chunks(self.max_phrase_words) {
                if seen.insert(chunk.join(" ")) {
                    candidates.push(chunk.to_vec());
                }
            }
        }
        candidates
    }
}

/// Mean TextRank score of a phrase's words; unranked words count as zero.
fn phrase_score(text_rank: &TextRank, words: &[String]) -> f32 {
    let total: f32 = words
        .iter()
        .map(|w| text_rank.get_word_score(&w.replace("'s", "")))
        .sum();
    total / words.len() as f32
}

impl PhraseExtractor for TextRankExtractor {
    fn extract(&self, text: &str) -> Vec<String> {
        let candidates = self.candidates(text);
        if candidates.is_empty() {
            return Vec::new();
        }

        let no_stopwords: &[String] = &[];
        let text_rank = TextRank::new(TextRankParams::WithDefaults(text, no_stopwords));

        let mut scored: Vec<(String, f32)> = candidates
            .into_iter()
            .map(|words| {
                let score = phrase_score(&text_rank, &words);
                (words.join(" "), score)
            })
            .collect();
        // Compared at fixed precision: TextRank sums edge weights in hash
        // order, so equal scores can differ in the last bits between runs.
        // The sort is stable, so ties keep text order.
        scored.sort_by_key(|(_, score)| Reverse((score * 1e4).round() as i64));

        tracing::trace!(count = scored.len(), "ranked candidate phrases");
        scored.into_iter().map(|(phrase, _)| phrase).collect()
    }
}
