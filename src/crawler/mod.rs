//! Crawler module: frontier, scheduler, fetcher, extractor, admission
//!
//! A crawl session seeds the frontier from the configured entry points,
//! drives it with a politeness-throttled worker pool, and hands the
//! collected page records to the artifact writer when the frontier drains.

mod admission;
mod extractor;
mod fetcher;
mod frontier;
mod scheduler;

pub use admission::{is_blacklisted, normalize_url};
pub use extractor::{extract_page, ExtractedPage};
pub use fetcher::{build_http_client, fetch_page, FetchError};
pub use frontier::{Claim, Frontier, FrontierEntry};
pub use scheduler::CrawlStats;

use crate::artifact::ArtifactWriter;
use crate::config::Config;
use crate::CrawlError;
use scheduler::{run_workers, WorkerContext};
use std::path::{Path, PathBuf};
use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Summary of a completed crawl session
#[derive(Debug)]
pub struct CrawlReport {
    /// Pages fetched and recorded
    pub pages_crawled: usize,

    /// Pages abandoned after a failed fetch
    pub pages_failed: usize,

    /// Discovered links rejected by the admission filter
    pub links_skipped: usize,

    /// The artifact file written for this session, if any page was recorded
    pub artifact: Option<PathBuf>,
}

/// Runs a full crawl session
///
/// Seeds the frontier (seeds failing the admission filter are skipped with
/// a warning), runs the worker pool until the frontier drains, and writes
/// one artifact file for the session.
pub async fn crawl(config: &Config) -> Result<CrawlReport, CrawlError> {
    let client = build_http_client(&config.user_agent)?;

    let frontier = Frontier::new();
    let mut primary_host = None;

    for seed in &config.crawler.entry_points {
        let Some(url) = normalize_url(seed) else {
            tracing::warn!("Seed {} is not a crawlable HTTP(S) URL, skipping", seed);
            continue;
        };

        if is_blacklisted(&url) {
            tracing::warn!("Seed {} rejected by the admission filter, skipping", url);
            continue;
        }

        if primary_host.is_none() {
            primary_host = url.host_str().map(str::to_string);
        }

        frontier.admit(url, 0);
    }

    let seeded = frontier.queued();
    tracing::info!(
        "Seeded frontier with {} of {} entry points (max depth {}, {} workers, {}ms delay)",
        seeded,
        config.crawler.entry_points.len(),
        config.crawler.max_depth,
        config.crawler.parallelism,
        config.crawler.delay
    );

    let ctx = Arc::new(WorkerContext {
        frontier,
        client,
        records: Mutex::new(Vec::new()),
        stats: CrawlStats::default(),
        max_depth: config.crawler.max_depth,
        delay: Duration::from_millis(config.crawler.delay),
    });

    let started = std::time::Instant::now();
    run_workers(Arc::clone(&ctx), config.crawler.parallelism).await;

    let records = std::mem::take(&mut *ctx.records.lock().unwrap());
    let report = CrawlReport {
        pages_crawled: ctx.stats.pages_crawled.load(Ordering::Relaxed),
        pages_failed: ctx.stats.pages_failed.load(Ordering::Relaxed),
        links_skipped: ctx.stats.links_skipped.load(Ordering::Relaxed),
        artifact: None,
    };

    tracing::info!(
        "Crawl completed: {} pages crawled, {} failed, {} links skipped in {:?}",
        report.pages_crawled,
        report.pages_failed,
        report.links_skipped,
        started.elapsed()
    );

    if records.is_empty() {
        return Ok(report);
    }

    let writer = ArtifactWriter::new(Path::new(&config.output.data_dir));
    let site = primary_host.unwrap_or_else(|| "session".to_string());
    let artifact = writer.write(&site, &records)?;

    Ok(CrawlReport {
        artifact: Some(artifact),
        ..report
    })
}
