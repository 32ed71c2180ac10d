use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::Result;

use docsearch_core::config::resolve_with_base;
use docsearch_core::traits::SearchEngine;
use docsearch_core::types::{FilesResponse, HistoryResponse};

use crate::output::{format_files, format_history, format_json, format_search, format_upload};
use crate::upload::upload_path;

pub const HELP: &str = "\
Commands:
  /upload <path>   index a TXT, PDF, CSV or JSON file
  /files           list uploaded files
  /history         show recent searches
  /delete <name>   remove an uploaded file
  /help            show this help
  /quit            exit
Anything else is searched.";

/// What the caller should do after a line was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Print(String),
    Quit,
}

/// Interactive session over one engine. Relative upload paths resolve
/// against `base_dir`.
pub struct Repl<'e> {
    engine: &'e dyn SearchEngine,
    base_dir: &'e Path,
    json: bool,
}

impl<'e> Repl<'e> {
    pub fn new(engine: &'e dyn SearchEngine, base_dir: &'e Path, json: bool) -> Self {
        Self { engine, base_dir, json }
    }

    /// Handle one input line. Failures are rendered, never returned, so a bad
    /// command does not end the session.
    pub fn handle_line(&self, line: &str) -> Step {
        let line = line.trim();
        let (cmd, arg) = match line.split_once(char::is_whitespace) {
            Some((cmd, arg)) => (cmd, arg.trim()),
            None => (line, ""),
        };
        let rendered = match cmd {
            "" => return Step::Print(String::new()),
            "/quit" | "/exit" => return Step::Quit,
            "/help" => Ok(HELP.to_string()),
            "/upload" if arg.is_empty() => Ok("usage: /upload <path>".to_string()),
            "/upload" => upload_path(self.engine, &resolve_with_base(self.base_dir, arg))
                .map(|resp| if self.json { format_json(&resp) } else { format_upload(&resp) }),
            "/files" => {
                let files = self.engine.list_files();
                Ok(if self.json { format_json(&FilesResponse { files }) } else { format_files(&files) })
            }
            "/history" => {
                let history = self.engine.history();
                Ok(if self.json { format_json(&HistoryResponse { history }) } else { format_history(&history) })
            }
            "/delete" if arg.is_empty() => Ok("usage: /delete <name>".to_string()),
            "/delete" => self.engine.remove_file(arg).map(|()| format!("deleted {arg}")).map_err(Into::into),
            _ if cmd.starts_with('/') => Ok(format!("unknown command {cmd}, try /help")),
            _ => self
                .engine
                .search(line)
                .map(|resp| if self.json { format_json(&resp) } else { format_search(&resp) })
                .map_err(Into::into),
        };
        Step::Print(rendered.unwrap_or_else(|e: anyhow::Error| format!("error: {e}")))
    }

    /// Read lines until `/quit` or end of input.
    pub fn run(&self, input: impl BufRead, mut output: impl Write) -> Result<()> {
        write!(output, "> ")?;
        output.flush()?;
        for line in input.lines() {
            match self.handle_line(&line?) {
                Step::Quit => break,
                Step::Print(text) => {
                    if !text.is_empty() {
                        writeln!(output, "{text}")?;
                    }
                }
            }
            write!(output, "> ")?;
            output.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsearch_hybrid::HybridSearchEngine;
    use pretty_assertions::assert_eq;

    fn printed(step: Step) -> String {
        match step {
            Step::Print(text) => text,
            Step::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn upload_search_delete_cycle() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("notes.txt"), "Alpha beta.\n\nGamma delta.").expect("write");
        let engine = HybridSearchEngine::new();
        let repl = Repl::new(&engine, dir.path(), false);

        assert_eq!(printed(repl.handle_line("/upload notes.txt")), "success notes.txt (2 chunks)");
        assert_eq!(printed(repl.handle_line("/files")), "notes.txt [txt] 2 chunks");
        assert!(printed(repl.handle_line("gamma")).contains("Paragraph 2"));
        assert_eq!(printed(repl.handle_line("/history")), "1. gamma");
        assert_eq!(printed(repl.handle_line("/delete notes.txt")), "deleted notes.txt");
        assert_eq!(printed(repl.handle_line("/files")), "No files uploaded");
    }

    #[test]
    fn errors_are_printed_not_fatal() {
        let dir = tempfile::tempdir().expect("tempdir");
        let engine = HybridSearchEngine::new();
        let repl = Repl::new(&engine, dir.path(), false);
        assert_eq!(printed(repl.handle_line("/delete ghost.txt")), "error: Not found: ghost.txt");
        assert!(printed(repl.handle_line("/upload slides.pptx")).starts_with("error: Unsupported file type 'pptx'"));
        assert_eq!(printed(repl.handle_line("/bogus")), "unknown command /bogus, try /help");
    }

    #[test]
    fn run_stops_at_quit() {
        let dir = tempfile::tempdir().expect("tempdir");
        let engine = HybridSearchEngine::new();
        let repl = Repl::new(&engine, dir.path(), true);
        let mut out = Vec::new();
        repl.run("/history\n/quit\nignored\n".as_bytes(), &mut out).expect("run");
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains("\"history\": []"));
        assert!(!text.contains("ignored"));
        assert_eq!(engine.history(), Vec::<String>::new());
    }
}
