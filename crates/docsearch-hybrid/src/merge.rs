use std::collections::HashSet;

use docsearch_core::file_type::infer_file_type;
use docsearch_core::types::{FileEntry, FileResult, HitsByFile, MatchView, SearchHit};
use docsearch_text::extract_snippet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeOptions {
    pub per_file_limit: usize,
    pub snippet_max_length: usize,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self { per_file_limit: 5, snippet_max_length: 150 }
    }
}

/// Combine lexical and semantic hits into per-file result blocks.
///
/// Within a file lexical hits come first, then semantic hits for chunks not
/// already seen; a chunk appears at most once and keeps its lexical entry.
/// The stable sort by score means equal scores keep that order.
/// `total_matches` counts the deduplicated hits before truncation.
/// Files come back best-score first, ties in `files` order.
pub fn merge_results<'a>(
    files: &'a [FileEntry],
    lexical: &HitsByFile<'a>,
    semantic: &HitsByFile<'a>,
    options: MergeOptions,
) -> Vec<FileResult> {
    let mut results = Vec::new();
    for file in files {
        let name = file.filename.as_str();
        let mut seen = HashSet::new();
        let mut merged: Vec<&SearchHit<'a>> = lexical
            .get(name)
            .iter()
            .chain(semantic.get(name))
            .filter(|hit| seen.insert(hit.chunk.chunk_id.as_str()))
            .collect();
        if merged.is_empty() {
            continue;
        }
        merged.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        let total_matches = merged.len();
        let matches = merged
            .into_iter()
            .take(options.per_file_limit)
            .map(|hit| to_view(hit, options.snippet_max_length))
            .collect();
        results.push(FileResult {
            file_name: file.filename.clone(),
            file_type: infer_file_type(name),
            matches,
            total_matches,
        });
    }
    results.sort_by(|a, b| b.best_score().partial_cmp(&a.best_score()).unwrap_or(std::cmp::Ordering::Equal));
    results
}

fn to_view(hit: &SearchHit<'_>, snippet_max_length: usize) -> MatchView {
    let chunk = hit.chunk;
    MatchView {
        chunk_id: chunk.chunk_id.clone(),
        title: chunk.title.clone(),
        content: extract_snippet(&chunk.content, "", snippet_max_length),
        score: round2(hit.score),
        source: hit.source,
        kind: chunk.kind,
        matches: hit.evidence.clone(),
        raw_data: chunk.raw_data.clone(),
    }
}

fn round2(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}
