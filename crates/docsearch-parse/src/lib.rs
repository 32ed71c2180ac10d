//! docsearch-parse
//!
//! Turns uploaded file bytes into chunks. One parser per supported file type;
//! `parse_file` picks the parser from the filename's extension and rejects
//! anything unsupported before looking at the bytes.

pub mod pdf;
pub mod records;
pub mod tabular;
pub mod text;

use docsearch_core::file_type::FileType;
use docsearch_core::traits::Parser;
use docsearch_core::types::Chunk;
use docsearch_core::Result;

pub use pdf::PdfParser;
pub use records::RecordsParser;
pub use tabular::TabularParser;
pub use text::TextParser;

pub fn parser_for(file_type: FileType) -> Box<dyn Parser> {
    match file_type {
        FileType::Text => Box::new(TextParser),
        FileType::Pdf => Box::new(PdfParser),
        FileType::Tabular => Box::new(TabularParser),
        FileType::Records => Box::new(RecordsParser),
    }
}

pub fn parse_file(filename: &str, bytes: &[u8]) -> Result<Vec<Chunk>> {
    let file_type = FileType::from_filename(filename)?;
    parser_for(file_type).parse(filename, bytes)
}
