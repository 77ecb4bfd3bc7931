//! Crawler module: the BFS engine and its supporting pipeline
//!
//! The engine dequeues a (url, depth) pair, checks robots.txt, fetches
//! through the rate-limited fetcher, parses the HTML, records a page,
//! and expands unseen in-budget links through the filter.

mod engine;
mod fetcher;
mod filter;
mod parser;
pub mod pool;
mod report;

pub use engine::CrawlEngine;
pub use fetcher::Fetcher;
pub use filter::UrlFilter;
pub use parser::{extract_body, parse_page, ParsedPage};
pub use report::{
    CancelToken, CrawlProgress, CrawlResult, CrawlTarget, EventKind, FailedFetch, PageRecord,
};
