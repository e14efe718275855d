//! HTTP fetcher implementation
//!
//! This module builds the shared HTTP client and performs the fetch half of
//! a worker's fetch/extract cycle. Fetch failures are local to the URL that
//! caused them: the caller logs them and moves on, it never aborts the
//! session.

use crate::config::UserAgentConfig;
use crate::crawler::extractor::{extract_page, ExtractedPage};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Per-URL fetch/extract failures
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("{url} answered HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("{url} is not an HTML page (content-type {content_type})")]
    ContentType { url: String, content_type: String },

    #[error("failed to read body of {url}: {source}")]
    Body { url: String, source: reqwest::Error },
}

/// Builds the HTTP client shared by all crawl workers
///
/// User-Agent format: `CrawlerName/Version (+ContactURL)`.
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    let user_agent = format!(
        "{}/{} (+{})",
        config.crawler_name, config.crawler_version, config.contact_url
    );

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and extracts its title, text fragments, and outbound links
///
/// Non-success statuses and non-HTML content types are errors: the admission
/// filter keeps most file resources out of the frontier, but a server is
/// free to answer anything for a page-looking path.
pub async fn fetch_page(client: &Client, url: &Url) -> Result<ExtractedPage, FetchError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|source| FetchError::Http {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    // A missing Content-Type header is tolerated; an explicit non-HTML one
    // is not.
    if !content_type.is_empty() && !content_type.contains("text/html") {
        return Err(FetchError::ContentType {
            url: url.to_string(),
            content_type,
        });
    }

    let body = response.text().await.map_err(|source| FetchError::Body {
        url: url.to_string(),
        source,
    })?;

    Ok(extract_page(&body, url))
}
