use crate::error::Result;
use crate::types::{Chunk, FileEntry, FileSummary, HitsByFile, SearchResponse};

/// Turns the raw bytes of one uploaded file into chunks. Implementations never
/// see other files and never touch the index.
pub trait Parser: Send + Sync {
    fn parse(&self, filename: &str, bytes: &[u8]) -> Result<Vec<Chunk>>;
}

/// Maps text into a fitted term-weight space. `transform` must reuse the
/// vocabulary and weights learned by the fit, never refit.
pub trait Vectorizer: Send + Sync {
    fn vocabulary_len(&self) -> usize;
    fn transform(&self, text: &str) -> SparseVector;
}

/// Scores every chunk of a snapshot against a query.
pub trait Matcher: Send + Sync {
    fn search<'a>(&self, query: &str, files: &'a [FileEntry]) -> HitsByFile<'a>;
}

/// Request-level surface of a document search engine. Implementations must be
/// safe to share across threads: searches may run while files are added or
/// removed, and each search sees either the state before a mutation or after.
pub trait SearchEngine: Send + Sync {
    /// Index `chunks` under `filename`, replacing any previous upload.
    fn add_file(&self, filename: &str, chunks: Vec<Chunk>);
    fn remove_file(&self, filename: &str) -> Result<()>;
    fn list_files(&self) -> Vec<FileSummary>;
    fn search(&self, query: &str) -> Result<SearchResponse>;
    /// Recent distinct queries, oldest first.
    fn history(&self) -> Vec<String>;
}

/// Sparse term-weight vector: `(term index, weight)` pairs sorted by index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f32)>,
}

impl SparseVector {
    /// Build from unsorted pairs; duplicate indices are summed.
    pub fn from_pairs(mut pairs: Vec<(usize, f32)>) -> Self {
        pairs.sort_by_key(|(idx, _)| *idx);
        let mut entries: Vec<(usize, f32)> = Vec::with_capacity(pairs.len());
        for (idx, w) in pairs {
            match entries.last_mut() {
                Some((last, acc)) if *last == idx => *acc += w,
                _ => entries.push((idx, w)),
            }
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[(usize, f32)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|(_, w)| *w == 0.0)
    }

    pub fn norm(&self) -> f32 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f32>().sqrt()
    }

    /// Scale to unit length. Zero vectors are left untouched.
    pub fn normalized(mut self) -> Self {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, w) in &mut self.entries {
                *w /= norm;
            }
        }
        self
    }

    pub fn dot(&self, other: &SparseVector) -> f32 {
        let (mut i, mut j, mut acc) = (0, 0, 0.0f32);
        while i < self.entries.len() && j < other.entries.len() {
            let (a_idx, a_w) = self.entries[i];
            let (b_idx, b_w) = other.entries[j];
            match a_idx.cmp(&b_idx) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    acc += a_w * b_w;
                    i += 1;
                    j += 1;
                }
            }
        }
        acc
    }

    /// Cosine similarity; zero when either side has no weight.
    pub fn cosine(&self, other: &SparseVector) -> f32 {
        let denom = self.norm() * other.norm();
        if denom == 0.0 { 0.0 } else { self.dot(other) / denom }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_pairs_sorts_and_merges() {
        let v = SparseVector::from_pairs(vec![(3, 1.0), (1, 2.0), (3, 0.5)]);
        assert_eq!(v.entries(), &[(1, 2.0), (3, 1.5)]);
    }

    #[test]
    fn cosine_of_identical_vectors_is_one() {
        let v = SparseVector::from_pairs(vec![(0, 3.0), (4, 4.0)]);
        assert!((v.cosine(&v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_of_disjoint_or_empty_vectors_is_zero() {
        let a = SparseVector::from_pairs(vec![(0, 1.0)]);
        let b = SparseVector::from_pairs(vec![(1, 1.0)]);
        assert_eq!(a.cosine(&b), 0.0);
        assert_eq!(a.cosine(&SparseVector::default()), 0.0);
    }

    #[test]
    fn normalized_has_unit_norm() {
        let v = SparseVector::from_pairs(vec![(0, 3.0), (1, 4.0)]).normalized();
        assert!((v.norm() - 1.0).abs() < 1e-6);
        assert!((v.entries()[0].1 - 0.6).abs() < 1e-6);
    }
}
