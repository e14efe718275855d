//! Configuration loading and validation
//!
//! Configuration is read from a TOML file, deserialized into typed structs,
//! and validated once at startup before being passed down to the crawler and
//! the indexing pipeline.

mod parser;
mod types;
mod validation;

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};
pub use validation::validate;
