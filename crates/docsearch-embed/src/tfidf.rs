use std::collections::HashMap;

use tracing::debug;

use docsearch_core::traits::{SparseVector, Vectorizer};
use docsearch_core::{Error, Result};
use docsearch_text::EnglishAnalyzer;

use crate::tokenize::term_counts;

/// Unfitted TF-IDF configuration.
///
/// Weighting: raw term count times smoothed idf `ln((1 + n) / (1 + df)) + 1`,
/// then L2 normalisation. Terms present in every document therefore weigh
/// less than terms present in few. The vocabulary keeps the `max_features`
/// terms with the highest corpus-wide count, ties broken alphabetically.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    analyzer: EnglishAnalyzer,
    max_features: usize,
}

impl TfidfVectorizer {
    pub fn new(max_features: usize) -> Self {
        Self { analyzer: EnglishAnalyzer::new(), max_features }
    }

    pub fn fit(&self, documents: &[String]) -> Result<FittedTfidf> {
        self.fit_transform(documents).map(|(fitted, _)| fitted)
    }

    /// Fit on `documents` and return their vectors, row `i` for document `i`.
    pub fn fit_transform(&self, documents: &[String]) -> Result<(FittedTfidf, Vec<SparseVector>)> {
        if documents.is_empty() {
            return Err(Error::Vectorization("cannot fit on an empty corpus".into()));
        }
        let counts: Vec<HashMap<String, u32>> =
            documents.iter().map(|doc| term_counts(&self.analyzer, doc)).collect();

        let mut totals: HashMap<&str, (u64, u32)> = HashMap::new();
        for doc in &counts {
            for (term, n) in doc {
                let entry = totals.entry(term.as_str()).or_insert((0, 0));
                entry.0 += u64::from(*n);
                entry.1 += 1;
            }
        }
        if totals.is_empty() {
            return Err(Error::Vectorization(
                "empty vocabulary; documents contain only stop words".into(),
            ));
        }

        let mut ranked: Vec<(&str, u64, u32)> = totals.into_iter().map(|(t, (tf, df))| (t, tf, df)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(self.max_features);
        ranked.sort_by(|a, b| a.0.cmp(b.0));

        let n_docs = documents.len() as f32;
        let mut vocabulary = HashMap::with_capacity(ranked.len());
        let mut idf = Vec::with_capacity(ranked.len());
        for (idx, (term, _, df)) in ranked.iter().enumerate() {
            vocabulary.insert((*term).to_string(), idx);
            idf.push(((1.0 + n_docs) / (1.0 + *df as f32)).ln() + 1.0);
        }
        debug!(documents = documents.len(), vocabulary = idf.len(), "fitted tf-idf");

        let fitted = FittedTfidf { analyzer: self.analyzer.clone(), vocabulary, idf };
        let vectors = counts.iter().map(|c| fitted.weigh(c)).collect();
        Ok((fitted, vectors))
    }
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new(1000)
    }
}

/// Vocabulary and idf weights learned from one corpus.
#[derive(Debug, Clone)]
pub struct FittedTfidf {
    analyzer: EnglishAnalyzer,
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
}

impl FittedTfidf {
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    pub fn idf(&self, term: &str) -> Option<f32> {
        self.term_index(term).map(|idx| self.idf[idx])
    }

    fn weigh(&self, counts: &HashMap<String, u32>) -> SparseVector {
        let pairs = counts
            .iter()
            .filter_map(|(term, n)| self.term_index(term).map(|idx| (idx, *n as f32 * self.idf[idx])))
            .collect();
        SparseVector::from_pairs(pairs).normalized()
    }
}

impl Vectorizer for FittedTfidf {
    fn vocabulary_len(&self) -> usize {
        self.idf.len()
    }

    fn transform(&self, text: &str) -> SparseVector {
        self.weigh(&term_counts(&self.analyzer, text))
    }
}
