use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, warn};

use docsearch_core::file_type::infer_file_type;
use docsearch_core::types::{Chunk, FileEntry, FileSummary};
use docsearch_core::{Error, Result};
use docsearch_vector::VectorSpace;

/// Point-in-time view of the index: the file mapping and the vector space
/// fitted over exactly those chunks.
#[derive(Debug)]
pub struct IndexSnapshot {
    version: u64,
    files: Vec<FileEntry>,
    space: Option<VectorSpace>,
}

impl IndexSnapshot {
    fn empty() -> Self {
        Self { version: 0, files: Vec::new(), space: None }
    }

    /// Fits the space over `files`. A failed fit publishes no space at all,
    /// so searches against this snapshot run lexical-only.
    fn build(version: u64, files: Vec<FileEntry>, max_features: usize) -> Self {
        let space = if files.iter().all(|f| f.chunks.is_empty()) {
            None
        } else {
            match VectorSpace::build(&files, max_features) {
                Ok(space) => Some(space),
                Err(e) => {
                    warn!(version, error = %e, "vector rebuild failed; snapshot is lexical-only");
                    None
                }
            }
        };
        Self { version, files, space }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    pub fn space(&self) -> Option<&VectorSpace> {
        self.space.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn file(&self, filename: &str) -> Option<&FileEntry> {
        self.files.iter().find(|f| f.filename == filename)
    }

    pub fn total_chunks(&self) -> usize {
        self.files.iter().map(|f| f.chunks.len()).sum()
    }

    pub fn file_summaries(&self) -> Vec<FileSummary> {
        self.files
            .iter()
            .map(|f| FileSummary {
                filename: f.filename.clone(),
                file_type: infer_file_type(&f.filename),
                chunks_count: f.chunks.len(),
            })
            .collect()
    }
}

/// Owns the filename -> chunks mapping and its derived vector space.
///
/// Mutations hold the write lock while they rebuild, then publish the new
/// snapshot in one store; readers clone the current `Arc` and keep a
/// consistent view for the whole search, whatever happens after. Every
/// mutation refits the space over all chunks.
pub struct IndexManager {
    state: RwLock<Arc<IndexSnapshot>>,
    max_features: usize,
}

impl IndexManager {
    pub fn new(max_features: usize) -> Self {
        Self { state: RwLock::new(Arc::new(IndexSnapshot::empty())), max_features }
    }

    /// Insert or wholesale replace `filename`. A replaced file keeps its
    /// position in the listing.
    pub fn add_file(&self, filename: impl Into<String>, chunks: Vec<Chunk>) {
        let filename = filename.into();
        let mut state = self.state.write();
        let mut files = state.files.clone();
        let chunk_count = chunks.len();
        let entry = FileEntry { filename: filename.clone(), chunks };
        let replaced = match files.iter_mut().find(|f| f.filename == filename) {
            Some(existing) => {
                *existing = entry;
                true
            }
            None => {
                files.push(entry);
                false
            }
        };
        let next = IndexSnapshot::build(state.version + 1, files, self.max_features);
        info!(filename = %filename, chunks = chunk_count, replaced, version = next.version, "indexed file");
        *state = Arc::new(next);
    }

    pub fn remove_file(&self, filename: &str) -> Result<()> {
        let mut state = self.state.write();
        let Some(pos) = state.files.iter().position(|f| f.filename == filename) else {
            return Err(Error::NotFound(filename.to_string()));
        };
        let mut files = state.files.clone();
        files.remove(pos);
        let next = IndexSnapshot::build(state.version + 1, files, self.max_features);
        info!(filename, version = next.version, "removed file");
        *state = Arc::new(next);
        Ok(())
    }

    pub fn list_files(&self) -> Vec<FileSummary> {
        self.snapshot().file_summaries()
    }

    pub fn snapshot(&self) -> Arc<IndexSnapshot> {
        self.state.read().clone()
    }
}

impl Default for IndexManager {
    fn default() -> Self {
        Self::new(1000)
    }
}
