use tracing::debug;

use docsearch_core::traits::{SparseVector, Vectorizer};
use docsearch_core::types::{Chunk, FileEntry};
use docsearch_core::Result;
use docsearch_embed::{FittedTfidf, TfidfVectorizer};

/// Which chunk a vector row was built from: positions into the file slice the
/// space was built over, plus the filename for inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowOwner {
    pub filename: String,
    pub file: usize,
    pub chunk: usize,
}

/// One term-weight vector per chunk, fitted over the full chunk universe.
#[derive(Debug, Clone)]
pub struct VectorSpace {
    model: FittedTfidf,
    rows: Vec<SparseVector>,
    owners: Vec<RowOwner>,
}

impl VectorSpace {
    /// Fit over `title + " " + content` of every chunk, files in order.
    /// Fails with `Error::Vectorization` on an empty corpus or vocabulary.
    pub fn build(files: &[FileEntry], max_features: usize) -> Result<Self> {
        let mut texts = Vec::new();
        let mut owners = Vec::new();
        for (file_idx, file) in files.iter().enumerate() {
            for (chunk_idx, chunk) in file.chunks.iter().enumerate() {
                texts.push(chunk.vector_text());
                owners.push(RowOwner { filename: file.filename.clone(), file: file_idx, chunk: chunk_idx });
            }
        }
        let (model, rows) = TfidfVectorizer::new(max_features).fit_transform(&texts)?;
        debug!(rows = rows.len(), vocabulary = model.vocabulary_len(), "built vector space");
        Ok(Self { model, rows, owners })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn owners(&self) -> &[RowOwner] {
        &self.owners
    }

    pub fn rows(&self) -> &[SparseVector] {
        &self.rows
    }

    pub fn vocabulary_len(&self) -> usize {
        self.model.vocabulary_len()
    }

    /// Vectorize `text` with the fitted vocabulary and weights.
    pub fn transform(&self, text: &str) -> SparseVector {
        self.model.transform(text)
    }

    /// Resolve a row back to its chunk. `None` when `files` is not the slice
    /// the space was built over.
    pub fn resolve<'a>(&self, row: usize, files: &'a [FileEntry]) -> Option<(&'a str, &'a Chunk)> {
        let owner = self.owners.get(row)?;
        let file = files.get(owner.file).filter(|f| f.filename == owner.filename)?;
        file.chunks.get(owner.chunk).map(|chunk| (file.filename.as_str(), chunk))
    }
}
