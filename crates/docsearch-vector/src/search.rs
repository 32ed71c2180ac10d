use rayon::prelude::*;
use tracing::debug;

use docsearch_core::config::EngineSettings;
use docsearch_core::traits::Matcher;
use docsearch_core::types::{Evidence, EvidenceField, FileEntry, HitsByFile, SearchHit, SourceKind};
use docsearch_text::extract_snippet;

use crate::space::VectorSpace;

#[derive(Debug, Clone, PartialEq)]
pub struct SemanticOptions {
    /// Similarities must be strictly greater than this to count.
    pub threshold: f32,
    pub top_k: usize,
    /// Multiplier bringing similarities onto the lexical score scale.
    pub score_scale: f64,
    pub snippet_max_length: usize,
}

impl Default for SemanticOptions {
    fn default() -> Self {
        Self::from(&EngineSettings::default())
    }
}

impl From<&EngineSettings> for SemanticOptions {
    fn from(s: &EngineSettings) -> Self {
        Self {
            threshold: s.semantic_threshold,
            top_k: s.semantic_top_k,
            score_scale: s.semantic_score_scale,
            snippet_max_length: s.snippet_max_length,
        }
    }
}

/// Cosine-similarity matcher bound to one vector space. With no space (empty
/// corpus, or a failed fit) every search is empty.
pub struct SemanticMatcher<'s> {
    space: Option<&'s VectorSpace>,
    options: SemanticOptions,
}

impl<'s> SemanticMatcher<'s> {
    pub fn new(space: Option<&'s VectorSpace>, options: SemanticOptions) -> Self {
        Self { space, options }
    }

    /// `(row, similarity)` above the threshold, best first, at most `top_k`.
    /// Equal similarities keep row order.
    pub fn ranked_rows(&self, query: &str) -> Vec<(usize, f32)> {
        let Some(space) = self.space else { return Vec::new() };
        let query_vec = space.transform(query);
        if query_vec.is_empty() {
            return Vec::new();
        }
        let similarities: Vec<f32> = space.rows().par_iter().map(|row| row.cosine(&query_vec)).collect();
        let mut ranked: Vec<(usize, f32)> = similarities
            .into_iter()
            .enumerate()
            .filter(|(_, sim)| *sim > self.options.threshold)
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked.truncate(self.options.top_k);
        ranked
    }
}

impl Matcher for SemanticMatcher<'_> {
    fn search<'a>(&self, query: &str, files: &'a [FileEntry]) -> HitsByFile<'a> {
        let mut hits = HitsByFile::new();
        let Some(space) = self.space else { return hits };
        for (row, similarity) in self.ranked_rows(query) {
            let Some((filename, chunk)) = space.resolve(row, files) else {
                debug!(row, "semantic row has no owning chunk; skipped");
                continue;
            };
            hits.push(
                filename,
                SearchHit {
                    chunk,
                    score: f64::from(similarity) * self.options.score_scale,
                    evidence: vec![Evidence::new(
                        EvidenceField::Semantic,
                        extract_snippet(&chunk.content, query, self.options.snippet_max_length),
                    )],
                    source: SourceKind::Semantic,
                },
            );
        }
        debug!(query, hits = hits.len(), "semantic search");
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsearch_core::types::{Chunk, ChunkKind};

    fn entry(name: &str, contents: &[&str]) -> FileEntry {
        let chunks = contents
            .iter()
            .enumerate()
            .map(|(i, c)| Chunk::new(i.to_string(), format!("Paragraph {}", i + 1), *c, ChunkKind::Paragraph))
            .collect();
        FileEntry { filename: name.to_string(), chunks }
    }

    #[test]
    fn no_space_means_no_hits() {
        let files = vec![entry("a.txt", &["alpha"])];
        let matcher = SemanticMatcher::new(None, SemanticOptions::default());
        assert!(matcher.search("alpha", &files).is_empty());
    }

    #[test]
    fn scores_are_scaled_similarities_above_threshold() {
        let files = vec![entry("a.txt", &["solar panels on the roof", "garden hose repair"])];
        let space = VectorSpace::build(&files, 1000).expect("build");
        let matcher = SemanticMatcher::new(Some(&space), SemanticOptions::default());
        let hits = matcher.search("solar roof", &files);
        let found = hits.get("a.txt");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].chunk.chunk_id, "0");
        assert!(found[0].score > 1.0 && found[0].score <= 10.0 + 1e-6);
        assert_eq!(found[0].source, SourceKind::Semantic);
        assert_eq!(found[0].evidence[0].field, EvidenceField::Semantic);
    }

    #[test]
    fn rows_without_an_owning_chunk_are_skipped() {
        let files = vec![entry("a.txt", &["solar roof"]), entry("b.txt", &["solar oven"])];
        let space = VectorSpace::build(&files, 1000).expect("build");
        let mut renamed = files.clone();
        renamed[0].filename = "moved.txt".to_string();

        let matcher = SemanticMatcher::new(Some(&space), SemanticOptions::default());
        assert_eq!(matcher.ranked_rows("solar").len(), 2);
        let hits = matcher.search("solar", &renamed);
        assert!(hits.get("moved.txt").is_empty());
        assert!(hits.get("a.txt").is_empty());
        let kept = hits.get("b.txt");
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].chunk.content, "solar oven");
    }

    #[test]
    fn top_k_bounds_the_result_count() {
        let contents: Vec<String> = (0..30).map(|i| format!("lantern note {i}")).collect();
        let refs: Vec<&str> = contents.iter().map(String::as_str).collect();
        let files = vec![entry("many.txt", &refs)];
        let space = VectorSpace::build(&files, 1000).expect("build");
        let options = SemanticOptions { top_k: 20, ..SemanticOptions::default() };
        let matcher = SemanticMatcher::new(Some(&space), options);
        assert_eq!(matcher.ranked_rows("lantern").len(), 20);
    }

    #[test]
    fn ranking_is_descending() {
        let files = vec![entry("a.txt", &["kettle", "kettle kettle boiler", "boiler room pipes valves"])];
        let space = VectorSpace::build(&files, 1000).expect("build");
        let matcher = SemanticMatcher::new(Some(&space), SemanticOptions::default());
        let ranked = matcher.ranked_rows("kettle");
        assert!(!ranked.is_empty());
        assert!(ranked.windows(2).all(|w| w[0].1 >= w[1].1));
    }
}
