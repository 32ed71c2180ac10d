use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};
use walkdir::WalkDir;

use docsearch_core::file_type::FileType;
use docsearch_core::traits::SearchEngine;
use docsearch_core::types::UploadResponse;
use docsearch_parse::parse_file;

/// Explicit files as given, followed by every supported file under `dir`
/// in path order.
pub fn collect_paths(files: &[PathBuf], dir: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = files.to_vec();
    if let Some(dir) = dir {
        let mut found: Vec<PathBuf> = WalkDir::new(dir)
            .into_iter()
            .filter_map(|e| match e {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!(error = %err, "skipping unreadable entry");
                    None
                }
            })
            .filter(|e| e.file_type().is_file())
            .filter(|e| FileType::from_filename(&e.file_name().to_string_lossy()).is_ok())
            .map(walkdir::DirEntry::into_path)
            .collect();
        found.sort();
        paths.extend(found);
    }
    for name in shared_file_names(&paths) {
        warn!(filename = %name, "several paths share this name; the last upload replaces the others");
    }
    paths
}

/// Base names that more than one path maps to. Files are indexed by base
/// name, so only the last of each group survives an upload.
pub fn shared_file_names(paths: &[PathBuf]) -> Vec<String> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for name in paths.iter().filter_map(|p| p.file_name()) {
        *counts.entry(name.to_string_lossy().into_owned()).or_default() += 1;
    }
    counts.into_iter().filter(|(_, n)| *n > 1).map(|(name, _)| name).collect()
}

/// Read, parse and index one file under its base name. The extension is
/// checked before the file is read.
pub fn upload_path(engine: &dyn SearchEngine, path: &Path) -> Result<UploadResponse> {
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .with_context(|| format!("not a file path: {}", path.display()))?;
    FileType::from_filename(&filename)?;
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let chunks = parse_file(&filename, &bytes)?;
    let chunks_created = chunks.len();
    engine.add_file(&filename, chunks);
    info!(filename = %filename, chunks_created, "uploaded");
    Ok(UploadResponse { filename, status: "success".to_string(), chunks_created })
}

/// Upload every path, continuing past failures. Results are in input order.
pub fn upload_all(
    engine: &dyn SearchEngine,
    paths: &[PathBuf],
    show_progress: bool,
) -> Result<Vec<(PathBuf, Result<UploadResponse>)>> {
    let pb = if show_progress { ProgressBar::new(paths.len() as u64) } else { ProgressBar::hidden() };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files {msg}")?
            .progress_chars("#>-"),
    );
    let mut out = Vec::with_capacity(paths.len());
    for path in paths {
        pb.set_message(path.display().to_string());
        let result = upload_path(engine, path);
        if let Err(e) = &result {
            warn!(path = %path.display(), error = %e, "upload failed");
        }
        out.push((path.clone(), result));
        pb.inc(1);
    }
    pb.finish_and_clear();
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsearch_hybrid::HybridSearchEngine;
    use pretty_assertions::assert_eq;

    #[test]
    fn unsupported_extension_is_rejected_before_reading() {
        let engine = HybridSearchEngine::new();
        let err = upload_path(&engine, Path::new("/definitely/missing/notes.docx")).unwrap_err();
        assert!(err.to_string().contains("docx"), "{err}");
        assert!(engine.list_files().is_empty());
    }

    #[test]
    fn uploads_under_the_base_name() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("notes.txt");
        fs::write(&path, "Alpha beta.\n\nGamma delta.").expect("write");
        let engine = HybridSearchEngine::new();
        let resp = upload_path(&engine, &path).expect("upload");
        assert_eq!(resp, UploadResponse { filename: "notes.txt".into(), status: "success".into(), chunks_created: 2 });
    }

    #[test]
    fn same_base_name_in_two_directories_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        for sub in ["a", "b"] {
            fs::create_dir(dir.path().join(sub)).expect("mkdir");
            fs::write(dir.path().join(sub).join("notes.txt"), sub).expect("write");
        }
        fs::write(dir.path().join("other.txt"), "x").expect("write");
        let paths = collect_paths(&[], Some(dir.path()));
        assert_eq!(paths.len(), 3);
        assert_eq!(shared_file_names(&paths), vec!["notes.txt".to_string()]);

        let engine = HybridSearchEngine::new();
        upload_all(&engine, &paths, false).expect("upload");
        let names: Vec<_> = engine.list_files().into_iter().map(|f| f.filename).collect();
        assert_eq!(names, vec!["notes.txt".to_string(), "other.txt".to_string()]);
    }

    #[test]
    fn directory_walk_keeps_supported_files_sorted() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::create_dir(dir.path().join("sub")).expect("mkdir");
        for name in ["b.txt", "a.csv", "skip.md", "sub/c.JSON"] {
            fs::write(dir.path().join(name), "x").expect("write");
        }
        let paths = collect_paths(&[], Some(dir.path()));
        let rel: Vec<_> = paths
            .iter()
            .map(|p| p.strip_prefix(dir.path()).expect("prefix").to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(rel, vec!["a.csv", "b.txt", "sub/c.JSON"]);
    }
}
