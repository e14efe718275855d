//! Worker pool driving the crawl frontier
//!
//! This module handles:
//! - Spawning `parallelism` concurrent worker tasks over a shared frontier
//! - The per-URL fetch/extract/record cycle
//! - Depth-limited link admission back into the frontier
//! - The per-worker politeness delay between fetches
//! - Session termination when the frontier drains

use crate::artifact::PageRecord;
use crate::crawler::admission::{is_blacklisted, normalize_url};
use crate::crawler::fetcher::fetch_page;
use crate::crawler::frontier::{Claim, Frontier, FrontierEntry};
use reqwest::Client;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// How long an idle worker sleeps before re-checking the frontier
///
/// Workers park here only while the queue is empty but a sibling still has a
/// fetch in flight that may discover new links.
const IDLE_POLL: Duration = Duration::from_millis(20);

/// Pages-crawled interval between progress log lines
const PROGRESS_INTERVAL: usize = 25;

/// Counters shared by all workers in a session
#[derive(Debug, Default)]
pub struct CrawlStats {
    /// Pages fetched and recorded successfully
    pub pages_crawled: AtomicUsize,

    /// Pages whose fetch or extract failed (abandoned, not retried)
    pub pages_failed: AtomicUsize,

    /// Discovered links rejected by the admission filter
    pub links_skipped: AtomicUsize,
}

/// Everything a worker needs, shared by handle across the pool
pub(crate) struct WorkerContext {
    pub frontier: Frontier,
    pub client: Client,
    pub records: Mutex<Vec<PageRecord>>,
    pub stats: CrawlStats,
    pub max_depth: u32,
    pub delay: Duration,
}

/// Runs `parallelism` workers against the shared frontier until it drains
pub(crate) async fn run_workers(ctx: Arc<WorkerContext>, parallelism: u32) {
    let mut handles = Vec::with_capacity(parallelism as usize);

    for worker_id in 0..parallelism {
        let ctx = Arc::clone(&ctx);
        handles.push(tokio::spawn(worker_loop(ctx, worker_id)));
    }

    for handle in handles {
        // A worker panic is a bug, but it must not wedge the session.
        if let Err(e) = handle.await {
            tracing::error!("Crawl worker aborted: {}", e);
        }
    }
}

/// One worker's claim/fetch/sleep cycle
async fn worker_loop(ctx: Arc<WorkerContext>, worker_id: u32) {
    loop {
        match ctx.frontier.try_claim() {
            Claim::Entry(entry) => {
                process_entry(&ctx, &entry).await;
                ctx.frontier.complete();

                // Politeness pause before requesting the next work item
                tokio::time::sleep(ctx.delay).await;
            }
            Claim::Wait => tokio::time::sleep(IDLE_POLL).await,
            Claim::Finished => {
                tracing::debug!("Worker {} exiting, frontier drained", worker_id);
                return;
            }
        }
    }
}

/// Fetches one frontier entry, records it, and admits its outbound links
///
/// Fetch failures are logged and counted; the URL is abandoned without
/// retry and the session continues.
async fn process_entry(ctx: &WorkerContext, entry: &FrontierEntry) {
    tracing::debug!("Fetching {} (depth {})", entry.url, entry.depth);

    let page = match fetch_page(&ctx.client, &entry.url).await {
        Ok(page) => page,
        Err(e) => {
            tracing::warn!("Abandoning {}: {}", entry.url, e);
            ctx.stats.pages_failed.fetch_add(1, Ordering::Relaxed);
            return;
        }
    };

    let record = PageRecord {
        url: entry.url.to_string(),
        title: page.title.unwrap_or_default(),
        texts: page.texts,
    };
    ctx.records.lock().unwrap().push(record);

    let crawled = ctx.stats.pages_crawled.fetch_add(1, Ordering::Relaxed) + 1;
    if crawled % PROGRESS_INTERVAL == 0 {
        tracing::info!(
            "Progress: {} pages crawled, {} queued",
            crawled,
            ctx.frontier.queued()
        );
    }

    let next_depth = entry.depth + 1;
    if next_depth > ctx.max_depth {
        return;
    }

    for link in &page.links {
        let Some(url) = normalize_url(link) else {
            tracing::debug!("Dropping uncrawlable link {}", link);
            continue;
        };

        if is_blacklisted(&url) {
            ctx.stats.links_skipped.fetch_add(1, Ordering::Relaxed);
            continue;
        }

        ctx.frontier.admit(url, next_depth);
    }
}
