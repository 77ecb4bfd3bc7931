//! Crawl session records and progress reporting types

use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A pending frontier entry: a URL and the depth it was discovered at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTarget {
    pub url: String,
    pub depth: u32,
}

/// Data extracted from one successfully fetched page
///
/// Created once per fetch and immutable afterward; owned by the
/// [`CrawlResult`] that contains it.
#[derive(Debug, Clone, Serialize)]
pub struct PageRecord {
    pub url: String,
    pub status_code: u16,
    pub title: String,
    pub meta_description: String,
    pub text_preview: String,
    #[serde(skip)]
    pub full_text: String,
    #[serde(skip)]
    pub headlines: Vec<String>,
    pub links_found: usize,
    pub depth: u32,
    pub error: Option<String>,
}

/// A URL whose fetch irrecoverably failed
///
/// `status_code` is 0 when the server was unreachable, otherwise the HTTP
/// status of the non-HTML response.
#[derive(Debug, Clone, Serialize)]
pub struct FailedFetch {
    pub url: String,
    pub status_code: u16,
}

/// Aggregated result of one crawl session
///
/// Appended to throughout a run and handed to the caller at the end;
/// never mutated afterward. Partial results from a cancelled run are
/// always valid and persistable.
#[derive(Debug, Clone, Serialize)]
pub struct CrawlResult {
    pub seed_url: String,
    pub total_crawled: usize,
    pub total_failed: usize,
    pub pages: Vec<PageRecord>,
    pub failed_urls: Vec<FailedFetch>,
}

impl CrawlResult {
    pub fn new(seed_url: impl Into<String>) -> Self {
        Self {
            seed_url: seed_url.into(),
            total_crawled: 0,
            total_failed: 0,
            pages: Vec::new(),
            failed_urls: Vec::new(),
        }
    }

    /// Records a successfully crawled page
    pub fn push_page(&mut self, page: PageRecord) {
        self.pages.push(page);
        self.total_crawled = self.pages.len();
    }

    /// Records an irrecoverably failed fetch
    pub fn push_failed(&mut self, url: impl Into<String>, status_code: u16) {
        self.failed_urls.push(FailedFetch {
            url: url.into(),
            status_code,
        });
        self.total_failed = self.failed_urls.len();
    }
}

/// What happened to the URL a progress event describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Fetched and parsed successfully
    Crawled,
    /// Skipped because robots.txt disallows it
    Blocked,
    /// Fetch failed after exhausting retries, or returned non-HTML
    Failed,
}

/// Progress event emitted once per processed URL
///
/// The sole coupling point between the engine and any UI/CLI layer.
#[derive(Debug, Clone, Serialize)]
pub struct CrawlProgress {
    pub pages_crawled: usize,
    pub max_pages: usize,
    pub current_url: String,
    pub current_title: String,
    pub current_depth: u32,
    pub status_code: u16,
    pub event_type: EventKind,
}

/// Shared cancellation flag
///
/// One setter (the user-facing control) and one reader (the engine loop);
/// an atomic boolean is all the synchronization required.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signals cancellation; the engine exits with its partial result
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
