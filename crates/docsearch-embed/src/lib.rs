//! Term-weighted text vectors.
//!
//! `TfidfVectorizer` learns a bounded vocabulary and inverse document
//! frequencies from a corpus; the resulting `FittedTfidf` maps any text into
//! the same space as L2-normalised sparse vectors, so cosine similarity is a
//! plain dot product.

pub mod tfidf;
pub mod tokenize;

pub use tfidf::{FittedTfidf, TfidfVectorizer};
pub use tokenize::term_counts;
