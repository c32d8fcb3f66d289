//! Plain-text rendering of ranked results.
//!
//! Each result becomes one block:
//!
//! ```text
//! Title: <title>
//! URL: <url>
//! id: <id>
//! Author: <author>              (only when present)
//! Published Date: <YYYY-MM-DD>  (only when present)
//! ```
//!
//! followed by an empty line.

use std::fmt::Write;

use crate::types::{CandidateDocument, RankedResult};

/// Length of the date portion of an ISO-8601 timestamp.
const DATE_PREFIX_LEN: usize = 10;

/// Keep only the `YYYY-MM-DD` part of a published date.
pub fn date_portion(published_date: &str) -> &str {
    match published_date.char_indices().nth(DATE_PREFIX_LEN) {
        Some((end, _)) => &published_date[..end],
        None => published_date,
    }
}

/// Render a single document block, without the trailing blank line.
pub fn format_document(document: &CandidateDocument) -> String {
    let mut block = String::new();
    // writing into a String cannot fail
    let _ = writeln!(block, "Title: {}", document.title);
    let _ = writeln!(block, "URL: {}", document.url);
    let _ = writeln!(block, "id: {}", document.id);
    if let Some(author) = document.author.as_deref().filter(|a| !a.is_empty()) {
        let _ = writeln!(block, "Author: {author}");
    }
    if let Some(date) = document
        .published_date
        .as_deref()
        .filter(|d| !d.is_empty())
    {
        let _ = writeln!(block, "Published Date: {}", date_portion(date));
    }
    block
}

/// Render ranked results as blank-line separated blocks.
pub fn format_results(results: &[RankedResult]) -> String {
    results
        .iter()
        .map(|result| format_document(&result.document) + "\n")
        .collect()
}
