//! Breadth-first crawl engine
//!
//! The engine owns the frontier queue and the page/depth budget, and
//! coordinates the filter, robots checker, fetcher, and parser. The main
//! loop is strictly single-threaded and sequential; BFS order and the
//! seen-set invariant depend on no two fetches ever being in flight at
//! once for the same session.

use crate::config::{validate, CrawlConfig};
use crate::crawler::fetcher::Fetcher;
use crate::crawler::filter::UrlFilter;
use crate::crawler::parser::parse_page;
use crate::crawler::report::{
    CancelToken, CrawlProgress, CrawlResult, CrawlTarget, EventKind, PageRecord,
};
use crate::robots::RobotsChecker;
use crate::Result;
use std::collections::VecDeque;
use tokio::sync::mpsc::UnboundedSender;
use url::Url;

/// Short timeout for robots.txt fetches, separate from the page timeout
const ROBOTS_TIMEOUT_SECS: u64 = 5;

/// Orchestrates one breadth-first crawl session
pub struct CrawlEngine {
    config: CrawlConfig,
    fetcher: Fetcher,
    filter: UrlFilter,
    robots: Option<RobotsChecker>,
    progress: Option<UnboundedSender<CrawlProgress>>,
    cancel: CancelToken,
}

impl CrawlEngine {
    /// Builds an engine, failing fast on configuration errors
    ///
    /// Invalid regex patterns, an unparseable seed URL, and client build
    /// failures all surface here, before the main loop begins.
    ///
    /// # Arguments
    ///
    /// * `config` - Immutable run parameters
    /// * `progress` - Optional channel the engine emits one event per
    ///   processed URL into; a dropped receiver never affects crawl state
    /// * `cancel` - Shared cancellation flag, polled each iteration
    pub fn new(
        config: CrawlConfig,
        progress: Option<UnboundedSender<CrawlProgress>>,
        cancel: CancelToken,
    ) -> Result<Self> {
        validate(&config)?;

        let fetcher = Fetcher::new(&config)?;
        let filter = UrlFilter::new(&config.seed_url, config.same_domain, &config.url_patterns)?;
        let robots = if config.respect_robots {
            Some(RobotsChecker::new(&config.user_agent, ROBOTS_TIMEOUT_SECS)?)
        } else {
            None
        };

        Ok(Self {
            config,
            fetcher,
            filter,
            robots,
            progress,
            cancel,
        })
    }

    /// Runs the crawl to completion and returns the accumulated result
    ///
    /// The run ends when the frontier drains, the page budget is
    /// exhausted, or cancellation is observed. Individual fetch and
    /// robots failures are recorded and never abort the session.
    pub async fn run(mut self) -> CrawlResult {
        let mut result = CrawlResult::new(self.config.seed_url.clone());

        let mut queue: VecDeque<CrawlTarget> = VecDeque::new();
        queue.push_back(CrawlTarget {
            url: self.config.seed_url.clone(),
            depth: 0,
        });
        self.filter.mark_seen(&self.config.seed_url);

        while !queue.is_empty() && result.total_crawled < self.config.max_pages {
            if self.cancel.is_cancelled() {
                tracing::info!("Crawl cancelled");
                break;
            }

            let Some(target) = queue.pop_front() else {
                break;
            };

            // Defensive: enqueue already enforces the depth limit
            if target.depth > self.config.max_depth {
                continue;
            }

            if let Some(robots) = self.robots.as_mut() {
                if !robots.is_allowed(&target.url).await {
                    tracing::info!("Blocked by robots.txt: {}", target.url);
                    self.emit(CrawlProgress {
                        pages_crawled: result.total_crawled,
                        max_pages: self.config.max_pages,
                        current_url: target.url.clone(),
                        current_title: "(robots.txt)".to_string(),
                        current_depth: target.depth,
                        status_code: 0,
                        event_type: EventKind::Blocked,
                    });
                    continue;
                }
            }

            if self.cancel.is_cancelled() {
                tracing::info!("Crawl cancelled");
                break;
            }

            let (html, status_code) = self.fetcher.fetch(&target.url).await;

            let Some(html) = html else {
                tracing::warn!("Failed: {} (status={})", target.url, status_code);
                result.push_failed(target.url.clone(), status_code);
                self.emit(CrawlProgress {
                    pages_crawled: result.total_crawled,
                    max_pages: self.config.max_pages,
                    current_url: target.url.clone(),
                    current_title: "(failed)".to_string(),
                    current_depth: target.depth,
                    status_code,
                    event_type: EventKind::Failed,
                });
                continue;
            };

            // The URL was admitted through the filter, so it parses
            let base = match Url::parse(&target.url) {
                Ok(u) => u,
                Err(e) => {
                    tracing::warn!("Unparseable frontier URL {}: {}", target.url, e);
                    result.push_failed(target.url.clone(), status_code);
                    continue;
                }
            };
            let parsed = parse_page(&html, &base);

            let page = PageRecord {
                url: target.url.clone(),
                status_code,
                title: parsed.title.clone(),
                meta_description: parsed.meta_description,
                text_preview: parsed.text_preview,
                full_text: parsed.full_text,
                headlines: parsed.headlines,
                links_found: parsed.links.len(),
                depth: target.depth,
                error: None,
            };
            result.push_page(page);

            tracing::info!(
                "[{}/{}] depth={} {} — {}",
                result.total_crawled,
                self.config.max_pages,
                target.depth,
                target.url,
                if parsed.title.is_empty() {
                    "(no title)"
                } else {
                    &parsed.title
                }
            );

            self.emit(CrawlProgress {
                pages_crawled: result.total_crawled,
                max_pages: self.config.max_pages,
                current_url: target.url.clone(),
                current_title: parsed.title,
                current_depth: target.depth,
                status_code,
                event_type: EventKind::Crawled,
            });

            if target.depth < self.config.max_depth {
                for link in self.filter.filter(&parsed.links) {
                    queue.push_back(CrawlTarget {
                        url: link,
                        depth: target.depth + 1,
                    });
                }
            }
        }

        result
    }

    /// Sends a progress event; observer failures never affect the crawl
    fn emit(&self, progress: CrawlProgress) {
        if let Some(sender) = &self.progress {
            let _ = sender.send(progress);
        }
    }
}
