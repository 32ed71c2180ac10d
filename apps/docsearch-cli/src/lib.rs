//! Request layer for the document search engine: uploads from disk, one-shot
//! search and an interactive session, rendered as text or JSON.

pub mod output;
pub mod repl;
pub mod upload;
