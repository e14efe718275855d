//! Index bootstrap: full rebuild of the index storage
//!
//! Every indexing run destroys the existing index storage and creates a
//! fresh, empty index with the fixed schema. There is no incremental update
//! path.

use crate::index::schema::SearchSchema;
use crate::index::IndexError;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tantivy::directory::MmapDirectory;
use tantivy::{Index, IndexSettings};

/// A freshly created index together with its schema handles
pub struct SearchIndex {
    pub(crate) index: Index,
    pub(crate) schema: SearchSchema,
}

impl SearchIndex {
    /// The underlying engine index (used by tests to inspect the result)
    pub fn raw(&self) -> &Index {
        &self.index
    }
}

/// Destroys any existing index storage at the path and creates a fresh one
///
/// If the directory cannot be cleaned or recreated, or the engine refuses
/// to create the index, no indexing is attempted.
pub fn create_index(index_path: &Path) -> Result<SearchIndex, IndexError> {
    match fs::remove_dir_all(index_path) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(source) => {
            return Err(IndexError::Directory {
                path: index_path.to_path_buf(),
                source,
            })
        }
    }

    fs::create_dir_all(index_path).map_err(|source| IndexError::Directory {
        path: index_path.to_path_buf(),
        source,
    })?;

    let schema = SearchSchema::build();

    let directory = MmapDirectory::open(index_path)
        .map_err(|e| IndexError::Engine(tantivy::TantivyError::from(e)))?;

    let index = Index::create(directory, schema.schema.clone(), IndexSettings::default())
        .map_err(IndexError::Engine)?;

    tracing::info!("Created fresh index at {}", index_path.display());

    Ok(SearchIndex { index, schema })
}
