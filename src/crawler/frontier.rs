//! Shared crawl frontier and visited set
//!
//! The frontier owns the pending work queue, the visited set, and the count
//! of in-flight fetches, all behind a single mutex so that workers observe
//! one consistent picture. It is shared by handle (`Arc<Frontier>`) across
//! the worker pool rather than living in process-wide state.

use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;
use url::Url;

/// A unit of crawl work: a URL and the depth it was discovered at
///
/// Seeds enter at depth 0. No entry deeper than the configured maximum is
/// ever enqueued.
#[derive(Debug, Clone)]
pub struct FrontierEntry {
    pub url: Url,
    pub depth: u32,
}

/// Outcome of asking the frontier for work
#[derive(Debug)]
pub enum Claim {
    /// An entry was claimed; the caller must call [`Frontier::complete`]
    /// when its fetch cycle is over
    Entry(FrontierEntry),

    /// The queue is momentarily empty but fetches are still in flight, so
    /// more work may yet appear
    Wait,

    /// The queue is empty and nothing is in flight: the session is done
    Finished,
}

struct FrontierState {
    queue: VecDeque<FrontierEntry>,
    visited: HashSet<String>,
    in_flight: usize,
}

/// Synchronized frontier shared by all crawl workers
pub struct Frontier {
    state: Mutex<FrontierState>,
}

impl Frontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FrontierState {
                queue: VecDeque::new(),
                visited: HashSet::new(),
                in_flight: 0,
            }),
        }
    }

    /// Admits a URL at the given depth if it has never been seen before
    ///
    /// The visited check and the insertion happen under one lock acquisition,
    /// so concurrent workers can never double-enqueue the same URL. Returns
    /// true when the URL was admitted.
    pub fn admit(&self, url: Url, depth: u32) -> bool {
        let mut state = self.state.lock().unwrap();

        if !state.visited.insert(url.as_str().to_string()) {
            return false;
        }

        state.queue.push_back(FrontierEntry { url, depth });
        true
    }

    /// Claims the next entry, or reports why none is available
    ///
    /// Claiming increments the in-flight count; the worker must pair every
    /// claimed entry with a [`Frontier::complete`] call, success or not.
    pub fn try_claim(&self) -> Claim {
        let mut state = self.state.lock().unwrap();

        match state.queue.pop_front() {
            Some(entry) => {
                state.in_flight += 1;
                Claim::Entry(entry)
            }
            None if state.in_flight > 0 => Claim::Wait,
            None => Claim::Finished,
        }
    }

    /// Marks a previously claimed entry's fetch cycle as over
    pub fn complete(&self) {
        let mut state = self.state.lock().unwrap();
        debug_assert!(state.in_flight > 0, "complete() without a claim");
        state.in_flight = state.in_flight.saturating_sub(1);
    }

    /// Number of entries waiting in the queue
    pub fn queued(&self) -> usize {
        self.state.lock().unwrap().queue.len()
    }

    /// Number of distinct URLs ever admitted
    pub fn visited_count(&self) -> usize {
        self.state.lock().unwrap().visited.len()
    }
}

impl Default for Frontier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn entry_url(path: &str) -> Url {
        Url::parse(&format!("https://example.com{}", path)).unwrap()
    }

    #[test]
    fn test_admit_then_claim() {
        let frontier = Frontier::new();
        assert!(frontier.admit(entry_url("/a"), 0));

        match frontier.try_claim() {
            Claim::Entry(entry) => {
                assert_eq!(entry.url.path(), "/a");
                assert_eq!(entry.depth, 0);
            }
            other => panic!("expected an entry, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_url_admitted_once() {
        let frontier = Frontier::new();
        assert!(frontier.admit(entry_url("/a"), 0));
        assert!(!frontier.admit(entry_url("/a"), 1));
        assert_eq!(frontier.queued(), 1);
        assert_eq!(frontier.visited_count(), 1);
    }

    #[test]
    fn test_empty_frontier_is_finished() {
        let frontier = Frontier::new();
        assert!(matches!(frontier.try_claim(), Claim::Finished));
    }

    #[test]
    fn test_in_flight_claim_yields_wait() {
        let frontier = Frontier::new();
        frontier.admit(entry_url("/a"), 0);

        // One worker holds the only entry; a second worker must wait, not
        // conclude the session is over.
        assert!(matches!(frontier.try_claim(), Claim::Entry(_)));
        assert!(matches!(frontier.try_claim(), Claim::Wait));

        frontier.complete();
        assert!(matches!(frontier.try_claim(), Claim::Finished));
    }

    #[test]
    fn test_work_discovered_while_in_flight() {
        let frontier = Frontier::new();
        frontier.admit(entry_url("/a"), 0);

        assert!(matches!(frontier.try_claim(), Claim::Entry(_)));
        frontier.admit(entry_url("/b"), 1);
        frontier.complete();

        match frontier.try_claim() {
            Claim::Entry(entry) => assert_eq!(entry.depth, 1),
            other => panic!("expected an entry, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_concurrent_admission_is_exclusive() {
        let frontier = Arc::new(Frontier::new());
        let mut handles = Vec::new();

        // Many tasks race to admit the same small set of URLs; each URL must
        // win exactly once in total.
        for _ in 0..8 {
            let frontier = Arc::clone(&frontier);
            handles.push(tokio::spawn(async move {
                let mut wins = 0;
                for i in 0..50 {
                    let url = Url::parse(&format!("https://example.com/page{}", i)).unwrap();
                    if frontier.admit(url, 0) {
                        wins += 1;
                    }
                }
                wins
            }));
        }

        let mut total_wins = 0;
        for handle in handles {
            total_wins += handle.await.unwrap();
        }

        assert_eq!(total_wins, 50);
        assert_eq!(frontier.queued(), 50);
        assert_eq!(frontier.visited_count(), 50);
    }
}
