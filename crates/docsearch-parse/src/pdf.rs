use lopdf::Document;
use tracing::warn;

use docsearch_core::traits::Parser;
use docsearch_core::types::{Chunk, ChunkKind};
use docsearch_core::{Error, Result};

use crate::text::paragraphs;

/// PDF: paragraphs of each page's extracted text. A page whose text cannot be
/// extracted is skipped; a document that cannot be loaded is a parse error.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfParser;

impl Parser for PdfParser {
    fn parse(&self, filename: &str, bytes: &[u8]) -> Result<Vec<Chunk>> {
        let doc = Document::load_mem(bytes).map_err(|e| Error::parse(filename, e))?;
        let mut chunks = Vec::new();
        for page_number in doc.get_pages().into_keys() {
            let text = match doc.extract_text(&[page_number]) {
                Ok(text) => text,
                Err(e) => {
                    warn!(filename, page = page_number, error = %e, "skipping unreadable pdf page");
                    continue;
                }
            };
            let page_idx = page_number.saturating_sub(1);
            for (i, p) in paragraphs(&text).enumerate() {
                chunks.push(Chunk::new(
                    format!("page_{page_idx}_para_{i}"),
                    format!("Page {page_number}, Paragraph {}", i + 1),
                    p,
                    ChunkKind::PdfParagraph,
                ));
            }
        }
        Ok(chunks)
    }
}
