//! Artifact files: the hand-off format between crawling and indexing
//!
//! An artifact file is a JSON array of page records for one crawl session.
//! The crawl side writes each file exactly once; the indexing side reads
//! them back without ever modifying them.

use crate::ArtifactError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File suffix identifying artifact files to the indexing pipeline
pub const ARTIFACT_SUFFIX: &str = ".json";

/// One extracted page, immutable once written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    /// The page URL (also the index's unique document key)
    pub url: String,

    /// The page title; empty when the page had none
    pub title: String,

    /// Ordered text fragments extracted from the page
    pub texts: Vec<String>,
}

/// Writes one artifact file per crawl session into the data directory
pub struct ArtifactWriter {
    data_dir: PathBuf,
}

impl ArtifactWriter {
    /// Creates a writer targeting the given data directory
    pub fn new(data_dir: &Path) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
        }
    }

    /// Serializes the session's records into a new artifact file
    ///
    /// The file name combines the site host and a timestamp, with a numeric
    /// suffix appended when that name is already taken, so files never
    /// collide across sessions or sites. The data directory is created if
    /// missing.
    pub fn write(&self, site: &str, records: &[PageRecord]) -> Result<PathBuf, ArtifactError> {
        fs::create_dir_all(&self.data_dir).map_err(|source| ArtifactError::Io {
            path: self.data_dir.clone(),
            source,
        })?;

        let path = self.unique_path(site);

        let json = serde_json::to_string_pretty(records).map_err(|source| ArtifactError::Parse {
            path: path.clone(),
            source,
        })?;

        fs::write(&path, json).map_err(|source| ArtifactError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::info!("Wrote {} records to {}", records.len(), path.display());
        Ok(path)
    }

    /// Picks a collision-free file name for this session
    fn unique_path(&self, site: &str) -> PathBuf {
        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
        let base = format!("crawl-{}-{}", sanitize_site(site), stamp);

        let mut path = self.data_dir.join(format!("{}{}", base, ARTIFACT_SUFFIX));
        let mut n = 1;
        while path.exists() {
            path = self
                .data_dir
                .join(format!("{}-{}{}", base, n, ARTIFACT_SUFFIX));
            n += 1;
        }

        path
    }
}

/// Makes a site name safe for use in a file name
///
/// Hosts can carry port separators; anything outside alphanumerics, dots,
/// and hyphens becomes a hyphen.
fn sanitize_site(site: &str) -> String {
    site.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// Loads and deserializes an artifact file into its ordered records
pub fn read_records(path: &Path) -> Result<Vec<PageRecord>, ArtifactError> {
    let content = fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
