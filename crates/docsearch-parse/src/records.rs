use serde_json::{json, Value};

use docsearch_core::traits::Parser;
use docsearch_core::types::{Chunk, ChunkKind};
use docsearch_core::{Error, Result};

use crate::text::decode_utf8;

/// JSON: one chunk per scalar field, titled by its path (`a.b[0].c`). Objects
/// and arrays are walked depth-first in document order; scalars sitting
/// directly in an array have no key and are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordsParser;

impl Parser for RecordsParser {
    fn parse(&self, filename: &str, bytes: &[u8]) -> Result<Vec<Chunk>> {
        let text = decode_utf8(filename, bytes)?;
        let value: Value = serde_json::from_str(text).map_err(|e| Error::parse(filename, e))?;
        let mut chunks = Vec::new();
        walk(&value, "", &mut chunks);
        Ok(chunks)
    }
}

fn walk(value: &Value, path: &str, out: &mut Vec<Chunk>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let child_path = if path.is_empty() { key.clone() } else { format!("{path}.{key}") };
                match child {
                    Value::Object(_) | Value::Array(_) => walk(child, &child_path, out),
                    scalar => {
                        let rendered = scalar_text(scalar);
                        let chunk = Chunk::new(
                            format!("field_{}", out.len()),
                            child_path,
                            format!("{key}: {rendered}"),
                            ChunkKind::StructuredField,
                        )
                        .with_raw_data(json!({ "key": key, "value": rendered }));
                        out.push(chunk);
                    }
                }
            }
        }
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                walk(item, &format!("{path}[{i}]"), out);
            }
        }
        _ => {}
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
