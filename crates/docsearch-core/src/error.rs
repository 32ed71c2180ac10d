use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse '{filename}': {cause}")]
    Parse { filename: String, cause: String },

    #[error("Unsupported file type '{0}'. Please upload TXT, PDF, CSV, or JSON files.")]
    UnsupportedFileType(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Vectorization failed: {0}")]
    Vectorization(String),

    #[error("Query cannot be empty")]
    EmptyQuery,
}

impl Error {
    pub fn parse(filename: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        Self::Parse { filename: filename.into(), cause: cause.to_string() }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
