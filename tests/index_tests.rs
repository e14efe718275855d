//! Integration tests for the indexing side
//!
//! These tests lay out artifact files by hand (so file names and ordering
//! are fully controlled) and verify the pipeline's counting, batching,
//! fail-fast, and full-rebuild behavior.

use pagesift::artifact::PageRecord;
use pagesift::config::OutputConfig;
use pagesift::index::{build_index, create_index, index_artifacts, IndexError};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn records(prefix: &str, count: usize) -> Vec<PageRecord> {
    (0..count)
        .map(|i| PageRecord {
            url: format!("https://{}.example.com/page{}", prefix, i),
            title: format!("{} page {}", prefix, i),
            texts: vec![format!("body of {} page {}", prefix, i)],
        })
        .collect()
}

fn write_artifact(data_dir: &Path, name: &str, records: &[PageRecord]) {
    fs::create_dir_all(data_dir).unwrap();
    let json = serde_json::to_string_pretty(records).unwrap();
    fs::write(data_dir.join(name), json).unwrap();
}

fn output_config(workspace: &TempDir) -> OutputConfig {
    OutputConfig {
        data_dir: workspace.path().join("data").display().to_string(),
        index_path: workspace.path().join("index").display().to_string(),
    }
}

fn num_docs(index_path: &str) -> u64 {
    let index = tantivy::Index::open_in_dir(index_path).unwrap();
    index.reader().unwrap().searcher().num_docs()
}

#[test]
fn test_count_sums_records_across_files() {
    let workspace = TempDir::new().unwrap();
    let output = output_config(&workspace);
    let data_dir = Path::new(&output.data_dir);

    // 20 + 20 + 15 records: one full batch at cumulative 50, final flush of 5.
    write_artifact(data_dir, "a.json", &records("a", 20));
    write_artifact(data_dir, "b.json", &records("b", 20));
    write_artifact(data_dir, "c.json", &records("c", 15));

    let count = build_index(&output).unwrap();
    assert_eq!(count, 55);
    assert_eq!(num_docs(&output.index_path), 55);
}

#[test]
fn test_batch_boundary_law() {
    let workspace = TempDir::new().unwrap();
    let output = output_config(&workspace);
    let data_dir = Path::new(&output.data_dir);

    write_artifact(data_dir, "a.json", &records("a", 20));
    write_artifact(data_dir, "b.json", &records("b", 20));
    write_artifact(data_dir, "c.json", &records("c", 15));

    let index = create_index(Path::new(&output.index_path)).unwrap();
    let report = index_artifacts(&index, data_dir).unwrap();

    // floor(55 / 50) full commits plus one final partial flush
    assert_eq!(report.documents, 55);
    assert_eq!(report.batches, 2);
}

#[test]
fn test_batch_count_without_remainder() {
    let workspace = TempDir::new().unwrap();
    let output = output_config(&workspace);
    let data_dir = Path::new(&output.data_dir);

    write_artifact(data_dir, "a.json", &records("a", 50));

    let index = create_index(Path::new(&output.index_path)).unwrap();
    let report = index_artifacts(&index, data_dir).unwrap();

    assert_eq!(report.documents, 50);
    assert_eq!(report.batches, 1);
}

#[test]
fn test_small_run_is_one_partial_batch() {
    let workspace = TempDir::new().unwrap();
    let output = output_config(&workspace);
    let data_dir = Path::new(&output.data_dir);

    write_artifact(data_dir, "a.json", &records("a", 7));

    let index = create_index(Path::new(&output.index_path)).unwrap();
    let report = index_artifacts(&index, data_dir).unwrap();

    assert_eq!(report.documents, 7);
    assert_eq!(report.batches, 1);
}

#[test]
fn test_malformed_artifact_fails_fast() {
    let workspace = TempDir::new().unwrap();
    let output = output_config(&workspace);
    let data_dir = Path::new(&output.data_dir);

    // 60 valid records commit one full batch before the malformed file
    // (sorted last) aborts the run.
    write_artifact(data_dir, "a.json", &records("a", 60));
    fs::write(data_dir.join("z-broken.json"), "{ not json").unwrap();

    let index = create_index(Path::new(&output.index_path)).unwrap();
    let result = index_artifacts(&index, data_dir);
    assert!(matches!(result, Err(IndexError::Artifact(_))));

    // The run reports an error (zero usable count), but the batch committed
    // before the failure is not rolled back.
    let reader = index.raw().reader().unwrap();
    assert_eq!(reader.searcher().num_docs(), 50);
}

#[test]
fn test_missing_data_dir_returns_error() {
    let workspace = TempDir::new().unwrap();
    let output = output_config(&workspace);

    // data_dir is never created
    let result = build_index(&output);
    assert!(matches!(result, Err(IndexError::List { .. })));
}

#[test]
fn test_rebuild_is_idempotent() {
    let workspace = TempDir::new().unwrap();
    let output = output_config(&workspace);
    let data_dir = Path::new(&output.data_dir);

    write_artifact(data_dir, "a.json", &records("a", 30));
    write_artifact(data_dir, "b.json", &records("b", 25));

    let first = build_index(&output).unwrap();
    let second = build_index(&output).unwrap();

    assert_eq!(first, 55);
    assert_eq!(second, 55);
    assert_eq!(num_docs(&output.index_path), 55);
}

#[test]
fn test_non_artifact_entries_are_ignored() {
    let workspace = TempDir::new().unwrap();
    let output = output_config(&workspace);
    let data_dir = Path::new(&output.data_dir);

    write_artifact(data_dir, "a.json", &records("a", 3));
    fs::write(data_dir.join("README.md"), "notes").unwrap();
    fs::create_dir(data_dir.join("nested")).unwrap();
    // an artifact-looking file inside a subdirectory is not scanned
    write_artifact(&data_dir.join("nested"), "b.json", &records("b", 5));

    let count = build_index(&output).unwrap();
    assert_eq!(count, 3);
}

#[test]
fn test_empty_artifact_file_contributes_nothing() {
    let workspace = TempDir::new().unwrap();
    let output = output_config(&workspace);
    let data_dir = Path::new(&output.data_dir);

    write_artifact(data_dir, "a.json", &[]);
    write_artifact(data_dir, "b.json", &records("b", 4));

    let count = build_index(&output).unwrap();
    assert_eq!(count, 4);
}
