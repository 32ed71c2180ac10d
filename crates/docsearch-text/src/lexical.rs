use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use docsearch_core::traits::Matcher;
use docsearch_core::types::{Chunk, Evidence, EvidenceField, FileEntry, HitsByFile, SearchHit, SourceKind};

use crate::snippet::extract_snippet;

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("word pattern compiles"));

const TITLE_PHRASE_SCORE: f64 = 3.0;
const CONTENT_PHRASE_SCORE: f64 = 2.0;
const WORD_SCORE: f64 = 1.0;

/// Lowercased word-boundary tokens (runs of alphanumerics and `_`), in order,
/// duplicates kept.
pub fn words(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    WORD_RE.find_iter(&lower).map(|m| m.as_str().to_string()).collect()
}

/// Exact/substring scorer.
///
/// Per chunk, cumulatively: +3 when the whole query occurs in the title, +2
/// when it occurs in the content, then +1 for every query word found in the
/// title and +1 for every query word found in the content. Zero-score chunks
/// are dropped.
#[derive(Debug, Clone)]
pub struct LexicalMatcher {
    snippet_max_length: usize,
}

impl LexicalMatcher {
    pub fn new(snippet_max_length: usize) -> Self {
        Self { snippet_max_length }
    }

    fn score_chunk<'a>(&self, chunk: &'a Chunk, query: &str, query_lower: &str, query_words: &[String]) -> Option<SearchHit<'a>> {
        let title = chunk.title.to_lowercase();
        let content = chunk.content.to_lowercase();
        let mut score = 0.0;
        let mut evidence = Vec::new();

        if title.contains(query_lower) {
            score += TITLE_PHRASE_SCORE;
            evidence.push(Evidence::new(EvidenceField::Title, chunk.title.clone()));
        }
        if content.contains(query_lower) {
            score += CONTENT_PHRASE_SCORE;
            evidence.push(Evidence::new(
                EvidenceField::Content,
                extract_snippet(&chunk.content, query, self.snippet_max_length),
            ));
        }
        for word in query_words {
            if title.contains(word.as_str()) {
                score += WORD_SCORE;
            }
            if content.contains(word.as_str()) {
                score += WORD_SCORE;
            }
        }

        (score > 0.0).then_some(SearchHit { chunk, score, evidence, source: SourceKind::Lexical })
    }
}

impl Default for LexicalMatcher {
    fn default() -> Self {
        Self::new(150)
    }
}

impl Matcher for LexicalMatcher {
    fn search<'a>(&self, query: &str, files: &'a [FileEntry]) -> HitsByFile<'a> {
        let mut hits = HitsByFile::new();
        let query = query.trim();
        if query.is_empty() {
            return hits;
        }
        let query_lower = query.to_lowercase();
        let query_words = words(&query_lower);

        for file in files {
            for chunk in &file.chunks {
                if let Some(hit) = self.score_chunk(chunk, query, &query_lower, &query_words) {
                    hits.push(&file.filename, hit);
                }
            }
        }
        debug!(query, hits = hits.len(), "lexical search");
        hits
    }
}
