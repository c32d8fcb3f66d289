//! TF-IDF vector space fitted on a small document set.
//!
//! Terms are lowercase runs of two or more word characters. IDF is
//! smoothed as `ln((1 + n) / (1 + df)) + 1`, term weights are raw counts
//! times IDF, and every vector is L2-normalised. Terms outside the fitted
//! vocabulary are ignored when transforming.

use std::collections::{BTreeMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;

static TOKEN_PATTERN: OnceLock<Regex> = OnceLock::new();

fn token_pattern() -> &'static Regex {
    TOKEN_PATTERN.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("invalid token regex pattern"))
}

/// Split text into lowercase terms of at least two word characters.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    token_pattern()
        .find_iter(&lowered)
        .map(|m| m.as_str().to_owned())
        .collect()
}

/// A fitted TF-IDF vocabulary.
#[derive(Debug, Clone, Default)]
pub struct TfidfSpace {
    /// Term → dimension index, sorted by term.
    vocabulary: BTreeMap<String, usize>,
    /// Smoothed IDF per dimension.
    idf: Vec<f64>,
}

impl TfidfSpace {
    /// Fit the vocabulary and IDF weights on `documents`.
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Self {
        let n = documents.len() as f64;
        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();
        for document in documents {
            let unique: HashSet<String> = tokenize(document.as_ref()).into_iter().collect();
            for term in unique {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (index, (term, df)) in document_frequency.into_iter().enumerate() {
            idf.push(((1.0 + n) / (1.0 + df as f64)).ln() + 1.0);
            vocabulary.insert(term, index);
        }

        Self { vocabulary, idf }
    }

    /// Number of dimensions.
    pub fn dimensions(&self) -> usize {
        self.idf.len()
    }

    /// IDF weight of a term, if it is in the vocabulary.
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|&i| self.idf[i])
    }

    /// Project text into the space as an L2-normalised dense vector.
    ///
    /// Text with no in-vocabulary terms maps to the zero vector.
    pub fn transform(&self, text: &str) -> Vec<f64> {
        let mut vector = vec![0.0; self.dimensions()];
        for term in tokenize(text) {
            if let Some(&index) = self.vocabulary.get(&term) {
                vector[index] += 1.0;
            }
        }
        for (weight, idf) in vector.iter_mut().zip(&self.idf) {
            *weight *= idf;
        }
        let norm = vector.iter().map(|w| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for weight in &mut vector {
                *weight /= norm;
            }
        }
        vector
    }
}

/// Cosine distance `1 - cos(a, b)`, clamped to `[0, 2]`.
///
/// A zero vector has similarity 0, and therefore distance 1, to everything.
pub fn cosine_distance(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }
    (1.0 - dot / (norm_a * norm_b)).clamp(0.0, 2.0)
}
