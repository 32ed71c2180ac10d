use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Declared type of an uploaded file, selecting which parser handles it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Text,
    Pdf,
    Tabular,
    Records,
}

impl FileType {
    pub const SUPPORTED_EXTENSIONS: [&'static str; 4] = ["txt", "pdf", "csv", "json"];

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "txt" => Some(Self::Text),
            "pdf" => Some(Self::Pdf),
            "csv" => Some(Self::Tabular),
            "json" => Some(Self::Records),
            _ => None,
        }
    }

    /// Resolve the parser type for `filename`, rejecting unsupported
    /// extensions before any bytes are read.
    pub fn from_filename(filename: &str) -> Result<Self> {
        let ext = infer_file_type(filename);
        Self::from_extension(&ext).ok_or(Error::UnsupportedFileType(ext))
    }
}

/// File type label shown to callers: the lowercased text after the last `.`,
/// or the whole lowercased name when there is no dot.
pub fn infer_file_type(filename: &str) -> String {
    filename.rsplit('.').next().unwrap_or(filename).to_lowercase()
}
