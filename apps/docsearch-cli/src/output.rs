//! Text and JSON rendering of the response types.

use serde::Serialize;

use docsearch_core::types::{FileSummary, SearchResponse, SourceKind, UploadResponse};

/// Pretty JSON for any response type.
pub fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

pub fn format_upload(resp: &UploadResponse) -> String {
    format!("{} {} ({} chunks)", resp.status, resp.filename, resp.chunks_created)
}

pub fn format_search(resp: &SearchResponse) -> String {
    let mut output = String::new();
    let matched: usize = resp.results.iter().map(|r| r.total_matches).sum();
    output.push_str(&format!(
        "\"{}\": {} in {} of {} files ({:.1} ms)\n",
        resp.query,
        plural(matched, "match", "matches"),
        resp.results.len(),
        resp.total_files_searched,
        resp.search_time_ms
    ));
    for file in &resp.results {
        output.push_str(&format!(
            "\n{} [{}] showing {} of {}\n",
            file.file_name,
            file.file_type,
            file.matches.len(),
            file.total_matches
        ));
        for (i, m) in file.matches.iter().enumerate() {
            let origin = match m.source {
                SourceKind::Lexical => "lexical",
                SourceKind::Semantic => "semantic",
            };
            output.push_str(&format!("  {}. {} score={:.2} {} id={}\n", i + 1, m.title, m.score, origin, m.chunk_id));
            output.push_str(&format!("     {}\n", m.content));
            for ev in &m.matches {
                output.push_str(&format!("     > {}\n", ev.text));
            }
        }
    }
    if !resp.suggestions.is_empty() {
        output.push_str("\nSuggestions:\n");
        for s in &resp.suggestions {
            output.push_str(&format!("  - {s}\n"));
        }
    }
    output.trim_end().to_string()
}

fn plural(count: usize, one: &str, many: &str) -> String {
    format!("{count} {}", if count == 1 { one } else { many })
}

pub fn format_files(files: &[FileSummary]) -> String {
    if files.is_empty() {
        return "No files uploaded".to_string();
    }
    files
        .iter()
        .map(|f| format!("{} [{}] {} chunks", f.filename, f.file_type, f.chunks_count))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_history(history: &[String]) -> String {
    if history.is_empty() {
        return "No searches yet".to_string();
    }
    history.iter().enumerate().map(|(i, q)| format!("{}. {q}", i + 1)).collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsearch_core::types::{ChunkKind, Evidence, EvidenceField, FileResult, MatchView};
    use pretty_assertions::assert_eq;

    fn response() -> SearchResponse {
        SearchResponse {
            query: "beta".into(),
            results: vec![FileResult {
                file_name: "notes.txt".into(),
                file_type: "txt".into(),
                matches: vec![MatchView {
                    chunk_id: "0".into(),
                    title: "Paragraph 1".into(),
                    content: "Alpha beta.".into(),
                    score: 3.0,
                    source: SourceKind::Lexical,
                    kind: ChunkKind::Paragraph,
                    matches: vec![Evidence::new(EvidenceField::Content, "Alpha beta.")],
                    raw_data: None,
                }],
                total_matches: 1,
            }],
            total_files_searched: 1,
            suggestions: vec![],
            search_time_ms: 0.42,
        }
    }

    #[test]
    fn human_search_lists_files_and_matches() {
        let text = format_search(&response());
        assert!(text.starts_with("\"beta\": 1 match in 1 of 1 files"));
        assert!(text.contains("notes.txt [txt] showing 1 of 1"));
        assert!(text.contains("1. Paragraph 1 score=3.00 lexical id=0"));
        assert!(!text.contains("Suggestions"));
    }

    #[test]
    fn match_count_agrees_with_its_noun() {
        let mut resp = response();
        resp.results[0].total_matches = 3;
        assert!(format_search(&resp).starts_with("\"beta\": 3 matches in 1 of 1 files"));
        resp.results.clear();
        resp.suggestions = vec!["Check your spelling".into()];
        let text = format_search(&resp);
        assert!(text.starts_with("\"beta\": 0 matches in 0 of 1 files"));
        assert!(text.ends_with("Suggestions:\n  - Check your spelling"));
    }

    #[test]
    fn json_uses_wire_field_names() {
        let value: serde_json::Value = serde_json::from_str(&format_json(&response())).expect("json");
        assert_eq!(value["results"][0]["matches"][0]["type"], "lexical");
        assert_eq!(value["results"][0]["matches"][0]["kind"], "paragraph");
        assert!(value["results"][0]["matches"][0].get("raw_data").is_none());
    }

    #[test]
    fn empty_listings_have_placeholders() {
        assert_eq!(format_files(&[]), "No files uploaded");
        assert_eq!(format_history(&[]), "No searches yet");
        assert_eq!(format_history(&["a".into(), "b".into()]), "1. a\n2. b");
    }
}
