//! Domain types shared by the parsers, the lexical and vector engines and the
//! request layer.

use serde::{Deserialize, Serialize};

/// Identifier of a chunk, unique only within the file that owns it.
pub type ChunkId = String;

/// Opaque structured payload carried alongside a chunk (e.g. a tabular row as
/// a header -> value record). Never interpreted by the engines.
pub type RawData = serde_json::Value;

/// Provenance tag of a chunk. Opaque to ranking, passed through to output.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ChunkKind {
    #[serde(rename = "paragraph")]
    Paragraph,
    #[serde(rename = "pdf_paragraph")]
    PdfParagraph,
    #[serde(rename = "csv_headers")]
    TabularHeaders,
    #[serde(rename = "csv_row")]
    TabularRow,
    #[serde(rename = "json_field")]
    StructuredField,
}

/// The smallest retrievable unit of a document.
///
/// - `chunk_id`: unique inside its file only
/// - `title`: short label such as "Paragraph 3" or "Row 12"
/// - `content`: the indexable text body
/// - `kind`: where the chunk came from
/// - `raw_data`: optional original structured form, passed through untouched
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    pub chunk_id: ChunkId,
    pub title: String,
    pub content: String,
    pub kind: ChunkKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_data: Option<RawData>,
}

impl Chunk {
    pub fn new(
        chunk_id: impl Into<ChunkId>,
        title: impl Into<String>,
        content: impl Into<String>,
        kind: ChunkKind,
    ) -> Self {
        Self { chunk_id: chunk_id.into(), title: title.into(), content: content.into(), kind, raw_data: None }
    }

    pub fn with_raw_data(mut self, raw_data: RawData) -> Self {
        self.raw_data = Some(raw_data);
        self
    }

    /// Text fed to the vectorizer: title and content joined by a space.
    pub fn vector_text(&self) -> String {
        format!("{} {}", self.title, self.content)
    }
}

/// All chunks of one uploaded file, in parser order.
#[derive(Debug, Clone, PartialEq)]
pub struct FileEntry {
    pub filename: String,
    pub chunks: Vec<Chunk>,
}

/// Indicates which engine produced a hit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Lexical,
    Semantic,
}

/// Which part of a chunk a piece of evidence was taken from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceField {
    Title,
    Content,
    Semantic,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Evidence {
    pub field: EvidenceField,
    pub text: String,
}

impl Evidence {
    pub fn new(field: EvidenceField, text: impl Into<String>) -> Self {
        Self { field, text: text.into() }
    }
}

/// A chunk scored by one engine. Borrows the chunk from the snapshot the
/// search ran against.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit<'a> {
    pub chunk: &'a Chunk,
    pub score: f64,
    pub evidence: Vec<Evidence>,
    pub source: SourceKind,
}

/// Hits of one engine grouped by filename, files in snapshot order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HitsByFile<'a> {
    groups: Vec<(&'a str, Vec<SearchHit<'a>>)>,
}

impl<'a> HitsByFile<'a> {
    pub fn new() -> Self {
        Self { groups: Vec::new() }
    }

    pub fn push(&mut self, filename: &'a str, hit: SearchHit<'a>) {
        match self.groups.iter_mut().find(|(name, _)| *name == filename) {
            Some((_, hits)) => hits.push(hit),
            None => self.groups.push((filename, vec![hit])),
        }
    }

    pub fn get(&self, filename: &str) -> &[SearchHit<'a>] {
        self.groups
            .iter()
            .find(|(name, _)| *name == filename)
            .map_or(&[][..], |(_, hits)| hits.as_slice())
    }

    pub fn files(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.groups.iter().map(|(name, _)| *name)
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(|(_, hits)| hits.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// One ranked match as returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchView {
    pub chunk_id: ChunkId,
    pub title: String,
    pub content: String,
    pub score: f64,
    #[serde(rename = "type")]
    pub source: SourceKind,
    pub kind: ChunkKind,
    pub matches: Vec<Evidence>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_data: Option<RawData>,
}

/// Per-file block of the merged result list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileResult {
    pub file_name: String,
    pub file_type: String,
    pub matches: Vec<MatchView>,
    pub total_matches: usize,
}

impl FileResult {
    pub fn best_score(&self) -> f64 {
        self.matches.iter().map(|m| m.score).fold(0.0, f64::max)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<FileResult>,
    pub total_files_searched: usize,
    pub suggestions: Vec<String>,
    pub search_time_ms: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadResponse {
    pub filename: String,
    pub status: String,
    pub chunks_created: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileSummary {
    pub filename: String,
    pub file_type: String,
    pub chunks_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryResponse {
    pub history: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilesResponse {
    pub files: Vec<FileSummary>,
}
