use docsearch_core::traits::Parser;
use docsearch_core::types::{Chunk, ChunkKind};
use docsearch_core::{Error, Result};

/// Blank-line separated paragraphs, trimmed, empties dropped.
pub fn paragraphs(text: &str) -> impl Iterator<Item = &str> {
    text.split("\n\n").map(str::trim).filter(|p| !p.is_empty())
}

pub fn decode_utf8<'b>(filename: &str, bytes: &'b [u8]) -> Result<&'b str> {
    std::str::from_utf8(bytes).map_err(|e| Error::parse(filename, e))
}

/// Plain text: one chunk per paragraph.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextParser;

impl Parser for TextParser {
    fn parse(&self, filename: &str, bytes: &[u8]) -> Result<Vec<Chunk>> {
        let text = decode_utf8(filename, bytes)?;
        Ok(paragraphs(text)
            .enumerate()
            .map(|(i, p)| Chunk::new(i.to_string(), format!("Paragraph {}", i + 1), p, ChunkKind::Paragraph))
            .collect())
    }
}
