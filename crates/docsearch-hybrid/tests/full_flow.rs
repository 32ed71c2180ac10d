use std::sync::atomic::{AtomicBool, Ordering};

use docsearch_core::traits::SearchEngine;
use docsearch_core::types::SourceKind;
use docsearch_hybrid::{HybridSearchEngine, IndexSnapshot};
use docsearch_parse::parse_file;
use pretty_assertions::assert_eq;

fn upload(engine: &HybridSearchEngine, filename: &str, body: &str) -> usize {
    let chunks = parse_file(filename, body.as_bytes()).expect("parse");
    let n = chunks.len();
    engine.add_file(filename, chunks);
    n
}

fn assert_consistent(snapshot: &IndexSnapshot) {
    let files = snapshot.files();
    let total: usize = files.iter().map(|f| f.chunks.len()).sum();
    match snapshot.space() {
        Some(space) => {
            assert_eq!(space.len(), total);
            for row in 0..space.len() {
                assert!(space.resolve(row, files).is_some(), "row {row} must resolve in its own snapshot");
            }
        }
        None => assert!(files.iter().all(|f| f.chunks.is_empty())),
    }
}

#[test]
fn paragraph_upload_then_search() {
    let engine = HybridSearchEngine::new();
    assert_eq!(upload(&engine, "notes.txt", "Alpha beta.\n\nGamma delta."), 2);

    let resp = engine.search("beta").expect("search");
    assert_eq!(resp.results.len(), 1);
    let file = &resp.results[0];
    assert_eq!(file.file_name, "notes.txt");
    assert_eq!(file.file_type, "txt");
    assert_eq!(file.matches.len(), 1);
    assert_eq!(file.matches[0].chunk_id, "0");
    assert!(file.matches[0].score >= 2.0);
}

#[test]
fn chunk_found_by_both_engines_appears_once_with_lexical_score() {
    let engine = HybridSearchEngine::new();
    upload(&engine, "notes.txt", "Alpha beta.\n\nGamma delta.");
    let snapshot = engine.index().snapshot();
    let semantic = docsearch_vector::SemanticMatcher::new(snapshot.space(), Default::default());
    assert!(!semantic.ranked_rows("beta").is_empty(), "semantic path must also match");

    let resp = engine.search("beta").expect("search");
    let hits: Vec<_> = resp.results[0].matches.iter().filter(|m| m.chunk_id == "0").collect();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].source, SourceKind::Lexical);
    assert_eq!(hits[0].score, 3.0);
}

#[test]
fn title_substring_scores_at_least_three() {
    let engine = HybridSearchEngine::new();
    upload(&engine, "people.csv", "name,role\nAda,engineer\n");
    let resp = engine.search("Row 1").expect("search");
    let row = resp.results[0].matches.iter().find(|m| m.title == "Row 1").expect("row 1 listed");
    assert!(row.score >= 3.0);
}

#[test]
fn twenty_matching_chunks_are_truncated_to_five() {
    let engine = HybridSearchEngine::new();
    let body: Vec<String> = (0..20).map(|i| format!("compost batch {i}")).collect();
    upload(&engine, "log.txt", &body.join("\n\n"));
    let resp = engine.search("compost").expect("search");
    assert_eq!(resp.results[0].total_matches, 20);
    assert_eq!(resp.results[0].matches.len(), 5);
}

#[test]
fn repeated_search_is_deterministic() {
    let engine = HybridSearchEngine::new();
    upload(&engine, "a.txt", "rain barrel overflow\n\nbarrel cleaning\n\nrain gauge");
    upload(&engine, "b.json", r#"{"barrel": {"size": "55 gallon"}, "notes": ["rain water"]}"#);
    let first = engine.search("rain barrel").expect("search");
    let second = engine.search("rain barrel").expect("search");
    assert_eq!(first.results, second.results);
    assert_eq!(first.suggestions, second.suggestions);
}

#[test]
fn add_then_remove_leaves_no_trace() {
    let engine = HybridSearchEngine::new();
    upload(&engine, "keep.txt", "firewood stack");
    upload(&engine, "gone.txt", "firewood splitter");
    engine.remove_file("gone.txt").expect("remove");

    let names: Vec<_> = engine.list_files().into_iter().map(|f| f.filename).collect();
    assert_eq!(names, vec!["keep.txt".to_string()]);
    let snapshot = engine.index().snapshot();
    let space = snapshot.space().expect("space");
    assert!(space.owners().iter().all(|o| o.filename == "keep.txt"));
    assert_consistent(&snapshot);

    let resp = engine.search("splitter").expect("search");
    assert!(resp.results.is_empty());
    assert!(!resp.suggestions.is_empty());
}

#[test]
fn history_never_exceeds_five() {
    let engine = HybridSearchEngine::new();
    upload(&engine, "a.txt", "anything");
    for q in ["one", "two", "three", "two", "four", "five", "six", "seven"] {
        engine.search(q).expect("search");
    }
    assert_eq!(engine.history(), vec!["three", "four", "five", "six", "seven"]);
}

#[test]
fn readers_only_see_consistent_snapshots_during_writes() {
    let engine = HybridSearchEngine::new();
    upload(&engine, "base.txt", "greenhouse vent\n\ngreenhouse heater");
    let done = AtomicBool::new(false);

    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                while !done.load(Ordering::Relaxed) {
                    let snapshot = engine.index().snapshot();
                    assert_consistent(&snapshot);
                    let resp = engine.search("greenhouse").expect("search");
                    assert!(resp.total_files_searched >= 1);
                }
            });
        }
        s.spawn(|| {
            for i in 0..25 {
                let name = format!("extra_{}.txt", i % 3);
                upload(&engine, &name, &format!("greenhouse shelf {i}\n\nseedling tray {i}"));
                if i % 2 == 1 {
                    engine.remove_file(&name).expect("remove");
                }
            }
            done.store(true, Ordering::Relaxed);
        });
    });

    assert_consistent(&engine.index().snapshot());
}
