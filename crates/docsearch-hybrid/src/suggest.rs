use std::collections::BTreeSet;

use docsearch_core::types::FileEntry;
use docsearch_text::words;

/// Returned as the only suggestion when nothing has been uploaded yet.
pub const EMPTY_INDEX_HINT: &str = "Please upload some files first";

pub const GENERIC_HINTS: [&str; 4] =
    ["Try different keywords", "Check your spelling", "Use simpler terms", "Try searching for partial words"];

/// Builds hints for a query that matched nothing.
#[derive(Debug, Clone, Copy)]
pub struct SuggestionGenerator {
    max_suggestions: usize,
    words_per_chunk: usize,
}

impl SuggestionGenerator {
    pub fn new(max_suggestions: usize, words_per_chunk: usize) -> Self {
        Self { max_suggestions, words_per_chunk }
    }

    /// Generic hints, then at most one "did you mean" built from the leading
    /// words of every chunk: the first query word with a candidate sharing
    /// its two-character prefix (and not equal to it) produces the hint.
    pub fn generate(&self, query: &str, files: &[FileEntry]) -> Vec<String> {
        let mut out: Vec<String> = GENERIC_HINTS.iter().map(ToString::to_string).collect();
        if !files.is_empty() {
            if let Some(hint) = self.did_you_mean(query, files) {
                out.push(hint);
            }
        }
        out.truncate(self.max_suggestions);
        out
    }

    fn did_you_mean(&self, query: &str, files: &[FileEntry]) -> Option<String> {
        let vocabulary: BTreeSet<String> = files
            .iter()
            .flat_map(|f| &f.chunks)
            .flat_map(|c| words(&c.content).into_iter().take(self.words_per_chunk))
            .collect();
        let lowered = query.to_lowercase();
        lowered.split_whitespace().find_map(|word| {
            let prefix: String = word.chars().take(2).collect();
            vocabulary
                .iter()
                .find(|candidate| candidate.starts_with(&prefix) && candidate.as_str() != word)
                .map(|candidate| format!("Try '{candidate}' instead of '{word}'"))
        })
    }
}

impl Default for SuggestionGenerator {
    fn default() -> Self {
        Self::new(5, 10)
    }
}
