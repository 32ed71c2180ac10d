//! Vector side of retrieval: a TF-IDF space fitted over every chunk of every
//! file, and cosine-similarity search against it.
//!
//! The space is rebuilt from scratch whenever the chunk set changes, an
//! O(total chunks) cost paid on every mutation.

pub mod search;
pub mod space;

pub use search::{SemanticMatcher, SemanticOptions};
pub use space::{RowOwner, VectorSpace};
