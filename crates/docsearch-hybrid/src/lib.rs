//! Request layer: the shared index, result merging, suggestions and history
//! behind one [`HybridSearchEngine`].

pub mod engine;
pub mod history;
pub mod index;
pub mod merge;
pub mod suggest;

pub use engine::HybridSearchEngine;
pub use history::SearchHistory;
pub use index::{IndexManager, IndexSnapshot};
pub use merge::{merge_results, MergeOptions};
pub use suggest::{SuggestionGenerator, EMPTY_INDEX_HINT, GENERIC_HINTS};
