//! docsearch-text
//!
//! Lexical side of retrieval: substring and token-overlap scoring over chunks,
//! snippet extraction around a match, and the English stop-word analyzer the
//! vectorizer tokenizes with.

pub mod analyzer;
pub mod lexical;
pub mod snippet;

pub use analyzer::EnglishAnalyzer;
pub use lexical::{words, LexicalMatcher};
pub use snippet::{extract_snippet, ELLIPSIS};
