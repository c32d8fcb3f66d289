//! Text preparation: stopword removal and keyword phrase extraction.

pub mod phrases;
pub mod stopwords;

pub use phrases::{PhraseExtractor, TextRankExtractor};
pub use stopwords::StopwordFilter;
