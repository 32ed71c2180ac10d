use std::collections::HashMap;

use docsearch_text::EnglishAnalyzer;

/// Raw occurrence count of every analyzed term in `text`.
pub fn term_counts(analyzer: &EnglishAnalyzer, text: &str) -> HashMap<String, u32> {
    let mut counts = HashMap::new();
    for token in analyzer.tokens(text) {
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}
