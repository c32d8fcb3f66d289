//! Candidate merging by markup-stripped title.
//!
//! Documents from every keyword query land in one collection keyed by the
//! title with HTML tags removed. A later document with the same key
//! replaces the earlier one's metadata (last write wins) but keeps the
//! position where the title was first seen, which is the insertion order
//! the ranker uses for tie-breaking.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::types::CandidateDocument;

static TAG_PATTERN: OnceLock<Regex> = OnceLock::new();

fn tag_pattern() -> &'static Regex {
    TAG_PATTERN.get_or_init(|| Regex::new(r"<[^>]+>").expect("invalid tag regex pattern"))
}

/// Remove every `<...>` tag from a title.
pub fn strip_tags(title: &str) -> String {
    tag_pattern().replace_all(title, "").into_owned()
}

/// Candidate documents deduplicated by stripped title, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct MergedDocuments {
    documents: Vec<CandidateDocument>,
    positions: HashMap<String, usize>,
}

impl MergedDocuments {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document, stripping markup from its title first.
    pub fn insert(&mut self, mut document: CandidateDocument) {
        document.title = strip_tags(&document.title);
        match self.positions.get(&document.title) {
            Some(&position) => self.documents[position] = document,
            None => {
                self.positions
                    .insert(document.title.clone(), self.documents.len());
                self.documents.push(document);
            }
        }
    }

    /// Number of distinct titles.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns `true` when nothing has been merged.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Titles in insertion order.
    pub fn titles(&self) -> Vec<&str> {
        self.documents.iter().map(|d| d.title.as_str()).collect()
    }

    /// Merged documents in insertion order.
    pub fn documents(&self) -> &[CandidateDocument] {
        &self.documents
    }

    /// Consume the collection, returning documents in insertion order.
    pub fn into_documents(self) -> Vec<CandidateDocument> {
        self.documents
    }
}

impl Extend<CandidateDocument> for MergedDocuments {
    fn extend<T: IntoIterator<Item = CandidateDocument>>(&mut self, iter: T) {
        for document in iter {
            self.insert(document);
        }
    }
}

impl FromIterator<CandidateDocument> for MergedDocuments {
    fn from_iter<T: IntoIterator<Item = CandidateDocument>>(iter: T) -> Self {
        let mut merged = Self::new();
        merged.extend(iter);
        merged
    }
}
