//! The artifact-to-index pipeline
//!
//! Strictly sequential: artifact files are scanned in name order, their
//! records mapped to index documents and committed to the engine in batches
//! of fixed size. A read, parse, or commit failure aborts the whole run —
//! there is no per-file skip.

use crate::artifact::{self, ARTIFACT_SUFFIX};
use crate::index::bootstrap::SearchIndex;
use crate::index::schema::{IndexDocument, SearchSchema};
use crate::index::IndexError;
use std::fs;
use std::path::{Path, PathBuf};
use tantivy::{IndexWriter, TantivyDocument};

/// Number of documents committed to the engine as one atomic batch
pub const BATCH_SIZE: usize = 50;

/// Memory budget handed to the engine's writer
const WRITER_MEMORY_BUDGET: usize = 50_000_000;

/// What a pipeline run did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexReport {
    /// Total documents committed
    pub documents: usize,

    /// Number of batch commits, including the final partial one
    pub batches: usize,
}

/// Bounded buffer of documents awaiting their batch commit
///
/// Never grows past [`BATCH_SIZE`]: the pipeline commits and drains it the
/// moment it fills.
struct DocumentBatch {
    docs: Vec<IndexDocument>,
}

impl DocumentBatch {
    fn new() -> Self {
        Self {
            docs: Vec::with_capacity(BATCH_SIZE),
        }
    }

    fn push(&mut self, doc: IndexDocument) {
        debug_assert!(self.docs.len() < BATCH_SIZE);
        self.docs.push(doc);
    }

    fn is_full(&self) -> bool {
        self.docs.len() >= BATCH_SIZE
    }

    fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    fn take(&mut self) -> Vec<IndexDocument> {
        std::mem::take(&mut self.docs)
    }
}

/// Indexes every artifact file in the data directory
///
/// # Algorithm
///
/// 1. List the data directory, skipping subdirectories and entries without
///    the artifact suffix; sort by name so batch boundaries are
///    deterministic.
/// 2. Deserialize each artifact into its ordered records; any failure
///    aborts the run immediately.
/// 3. Map each record to an [`IndexDocument`] and append it to the current
///    batch; batches span file boundaries.
/// 4. Commit each full batch synchronously, log the cumulative count, and
///    start a fresh batch.
/// 5. Commit the final partial batch if non-empty.
pub fn index_artifacts(index: &SearchIndex, data_dir: &Path) -> Result<IndexReport, IndexError> {
    let files = list_artifact_files(data_dir)?;
    tracing::info!(
        "Indexing {} artifact files from {}",
        files.len(),
        data_dir.display()
    );

    let mut writer: IndexWriter = index
        .index
        .writer(WRITER_MEMORY_BUDGET)
        .map_err(IndexError::Engine)?;

    let mut batch = DocumentBatch::new();
    let mut report = IndexReport {
        documents: 0,
        batches: 0,
    };

    for path in &files {
        let records = artifact::read_records(path)?;
        tracing::debug!("Loaded {} records from {}", records.len(), path.display());

        for record in records {
            report.documents += 1;
            batch.push(IndexDocument::from_record(record));

            if batch.is_full() {
                commit_batch(&mut writer, &index.schema, batch.take())?;
                report.batches += 1;
                tracing::info!("Documents already indexed: {}", report.documents);
            }
        }
    }

    // Flush the last partial batch
    if !batch.is_empty() {
        commit_batch(&mut writer, &index.schema, batch.take())?;
        report.batches += 1;
    }

    Ok(report)
}

/// Lists artifact files in the data directory, sorted by name
fn list_artifact_files(data_dir: &Path) -> Result<Vec<PathBuf>, IndexError> {
    let listing = fs::read_dir(data_dir).map_err(|source| IndexError::List {
        path: data_dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in listing {
        let entry = entry.map_err(|source| IndexError::List {
            path: data_dir.to_path_buf(),
            source,
        })?;

        let path = entry.path();
        if path.is_dir() {
            continue;
        }

        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !name.ends_with(ARTIFACT_SUFFIX) {
            continue;
        }

        files.push(path);
    }

    files.sort();
    Ok(files)
}

/// Commits one batch of documents to the engine as a unit
fn commit_batch(
    writer: &mut IndexWriter,
    schema: &SearchSchema,
    docs: Vec<IndexDocument>,
) -> Result<(), IndexError> {
    for doc in docs {
        let mut engine_doc = TantivyDocument::default();
        engine_doc.add_text(schema.url, &doc.url);
        engine_doc.add_text(schema.title, &doc.title);
        engine_doc.add_text(schema.body, &doc.body);

        writer.add_document(engine_doc).map_err(IndexError::Commit)?;
    }

    writer.commit().map_err(IndexError::Commit)?;
    Ok(())
}
