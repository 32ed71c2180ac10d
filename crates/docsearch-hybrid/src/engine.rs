use std::time::Instant;

use parking_lot::Mutex;
use tracing::{debug, info};

use docsearch_core::config::EngineSettings;
use docsearch_core::traits::{Matcher, SearchEngine};
use docsearch_core::types::{Chunk, FileSummary, SearchResponse};
use docsearch_core::{Error, Result};
use docsearch_text::LexicalMatcher;
use docsearch_vector::{SemanticMatcher, SemanticOptions};

use crate::history::SearchHistory;
use crate::index::IndexManager;
use crate::merge::{merge_results, MergeOptions};
use crate::suggest::{SuggestionGenerator, EMPTY_INDEX_HINT};

/// Lexical plus semantic search over an in-memory set of uploaded files.
pub struct HybridSearchEngine {
    settings: EngineSettings,
    index: IndexManager,
    lexical: LexicalMatcher,
    suggestions: SuggestionGenerator,
    history: Mutex<SearchHistory>,
}

impl HybridSearchEngine {
    pub fn new() -> Self {
        Self::with_settings(EngineSettings::default())
    }

    pub fn with_settings(settings: EngineSettings) -> Self {
        Self {
            index: IndexManager::new(settings.max_features),
            lexical: LexicalMatcher::new(settings.snippet_max_length),
            suggestions: SuggestionGenerator::new(settings.max_suggestions, settings.suggestion_words_per_chunk),
            history: Mutex::new(SearchHistory::new(settings.history_capacity)),
            settings,
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn index(&self) -> &IndexManager {
        &self.index
    }

    fn merge_options(&self) -> MergeOptions {
        MergeOptions {
            per_file_limit: self.settings.per_file_limit,
            snippet_max_length: self.settings.snippet_max_length,
        }
    }
}

impl Default for HybridSearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchEngine for HybridSearchEngine {
    fn add_file(&self, filename: &str, chunks: Vec<Chunk>) {
        self.index.add_file(filename, chunks);
    }

    fn remove_file(&self, filename: &str) -> Result<()> {
        self.index.remove_file(filename)
    }

    fn list_files(&self) -> Vec<FileSummary> {
        self.index.list_files()
    }

    fn search(&self, query: &str) -> Result<SearchResponse> {
        let started = Instant::now();
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::EmptyQuery);
        }
        self.history.lock().record(query);

        let snapshot = self.index.snapshot();
        if snapshot.is_empty() {
            return Ok(SearchResponse {
                query: query.to_string(),
                results: Vec::new(),
                total_files_searched: 0,
                suggestions: vec![EMPTY_INDEX_HINT.to_string()],
                search_time_ms: elapsed_ms(started),
            });
        }

        let files = snapshot.files();
        let lexical = self.lexical.search(query, files);
        let semantic = SemanticMatcher::new(snapshot.space(), SemanticOptions::from(&self.settings)).search(query, files);
        debug!(lexical = lexical.len(), semantic = semantic.len(), version = snapshot.version(), "engine hits");

        let results = merge_results(files, &lexical, &semantic, self.merge_options());
        let suggestions = if results.is_empty() { self.suggestions.generate(query, files) } else { Vec::new() };
        let search_time_ms = elapsed_ms(started);
        info!(query, files = results.len(), search_time_ms, "search");

        Ok(SearchResponse {
            query: query.to_string(),
            results,
            total_files_searched: files.len(),
            suggestions,
            search_time_ms,
        })
    }

    fn history(&self) -> Vec<String> {
        self.history.lock().recent()
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}
