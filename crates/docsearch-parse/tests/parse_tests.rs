use docsearch_core::types::ChunkKind;
use docsearch_core::Error;
use docsearch_parse::parse_file;

#[test]
fn dispatches_on_extension_case_insensitively() {
    let chunks = parse_file("NOTES.TXT", b"Alpha beta.\n\nGamma delta.").expect("txt");
    assert_eq!(chunks.len(), 2);
    assert!(chunks.iter().all(|c| c.kind == ChunkKind::Paragraph));

    let chunks = parse_file("people.csv", b"name\nAda\n").expect("csv");
    assert_eq!(chunks[0].kind, ChunkKind::TabularHeaders);
    assert_eq!(chunks[1].kind, ChunkKind::TabularRow);

    let chunks = parse_file("cfg.json", br#"{"a": "b"}"#).expect("json");
    assert_eq!(chunks[0].content, "a: b");
}

#[test]
fn unsupported_extensions_are_rejected_before_parsing() {
    let err = parse_file("photo.png", b"\x89PNG").unwrap_err();
    assert!(matches!(err, Error::UnsupportedFileType(ref ext) if ext == "png"));
}

#[test]
fn parse_errors_carry_the_filename() {
    let err = parse_file("broken.json", b"[1,").unwrap_err();
    assert!(err.to_string().contains("broken.json"), "{err}");
}
