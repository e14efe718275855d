//! Index side: bootstrap, batched pipeline, and throughput instrumentation
//!
//! Every run is a full rebuild: the index storage is wiped and recreated,
//! then every artifact in the data directory is committed to the engine in
//! batches. Pipeline errors propagate out of [`build_index`] to the caller;
//! nothing is swallowed at this boundary.

mod benchmark;
mod bootstrap;
mod pipeline;
mod schema;

pub use benchmark::run_timed;
pub use bootstrap::{create_index, SearchIndex};
pub use pipeline::{index_artifacts, IndexReport, BATCH_SIZE};
pub use schema::{IndexDocument, SearchSchema, TEXT_SEPARATOR};

use crate::config::OutputConfig;
use crate::ArtifactError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that abort an indexing run
///
/// All of these are global: unlike crawl-side fetch failures, any error
/// here stops the whole pipeline.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("Cannot prepare index directory {path}: {source}")]
    Directory {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot list data directory {path}: {source}")]
    List {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Artifact error: {0}")]
    Artifact(#[from] ArtifactError),

    #[error("Batch commit failed: {0}")]
    Commit(tantivy::TantivyError),

    #[error("Search engine error: {0}")]
    Engine(tantivy::TantivyError),
}

/// Rebuilds the search index from the artifacts in the data directory
///
/// Bootstraps fresh index storage, runs the batched pipeline under the
/// throughput benchmark, and returns the number of documents committed.
pub fn build_index(output: &OutputConfig) -> Result<usize, IndexError> {
    let index = create_index(Path::new(&output.index_path))?;

    let report = run_timed(|| index_artifacts(&index, Path::new(&output.data_dir)))?;

    Ok(report.documents)
}
