use serde::Deserialize;

/// Main configuration structure for pagesift
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Seed URLs the crawl session starts from
    #[serde(rename = "entry-points")]
    pub entry_points: Vec<String>,

    /// Maximum link depth to follow from the seeds (seeds are depth 0)
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Number of concurrent crawl workers
    pub parallelism: u32,

    /// Politeness pause each worker takes between fetches (milliseconds)
    pub delay: u64,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory artifact files are written to and indexed from
    #[serde(rename = "data-dir")]
    pub data_dir: String,

    /// Index storage path (destroyed and recreated on every indexing run)
    #[serde(rename = "index-path")]
    pub index_path: String,
}
