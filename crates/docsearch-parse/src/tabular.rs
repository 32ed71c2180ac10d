use serde_json::{Map, Value};

use docsearch_core::traits::Parser;
use docsearch_core::types::{Chunk, ChunkKind};
use docsearch_core::{Error, Result};

/// CSV with a header row: one chunk for the headers, then one per row whose
/// raw payload is the header -> value record.
#[derive(Debug, Clone, Copy, Default)]
pub struct TabularParser;

impl Parser for TabularParser {
    fn parse(&self, filename: &str, bytes: &[u8]) -> Result<Vec<Chunk>> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(bytes);
        let headers = reader.headers().map_err(|e| Error::parse(filename, e))?.clone();

        let mut chunks = vec![Chunk::new(
            "headers",
            "Column Headers",
            headers.iter().collect::<Vec<_>>().join(" "),
            ChunkKind::TabularHeaders,
        )];

        for (i, record) in reader.records().enumerate() {
            let record = record.map_err(|e| Error::parse(filename, e))?;
            let mut raw = Map::new();
            let mut parts = Vec::new();
            for (idx, header) in headers.iter().enumerate() {
                match record.get(idx) {
                    Some(value) => {
                        if !value.is_empty() {
                            parts.push(format!("{header}: {value}"));
                        }
                        raw.insert(header.to_string(), Value::String(value.to_string()));
                    }
                    None => {
                        raw.insert(header.to_string(), Value::Null);
                    }
                }
            }
            chunks.push(
                Chunk::new(format!("row_{i}"), format!("Row {}", i + 1), parts.join(" "), ChunkKind::TabularRow)
                    .with_raw_data(Value::Object(raw)),
            );
        }
        Ok(chunks)
    }
}
