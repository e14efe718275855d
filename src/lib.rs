//! Pagesift: a crawl-to-search pipeline
//!
//! This crate crawls a set of seed websites with a politeness-throttled
//! worker pool, persists extracted pages as JSON artifact files, and builds
//! a full-text search index from those artifacts in fixed-size batches.

pub mod artifact;
pub mod config;
pub mod crawler;
pub mod index;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for pagesift operations
#[derive(Debug, Error)]
pub enum PagesiftError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Crawl error: {0}")]
    Crawl(#[from] CrawlError),

    #[error("Indexing error: {0}")]
    Index(#[from] index::IndexError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors that abort a whole crawl session
///
/// Per-URL fetch failures are not represented here: they are logged and the
/// URL is abandoned without stopping the session.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Artifact error: {0}")]
    Artifact(#[from] ArtifactError),
}

/// Artifact file errors (writing on the crawl side, reading on the index side)
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("IO error for {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed artifact {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Result type alias for pagesift operations
pub type Result<T> = std::result::Result<T, PagesiftError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use artifact::PageRecord;
pub use config::Config;
pub use crawler::{crawl, CrawlReport};
pub use index::build_index;
