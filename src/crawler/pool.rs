//! Bounded worker pool for independent, order-insensitive fetch tasks
//!
//! Used for side paths where many URLs need fetching and transforming
//! outside the BFS loop (the sequential engine never uses this). Results
//! are returned in submission order even though completion order is
//! arbitrary, and a set cancel token abandons not-yet-started tasks
//! without blocking shutdown.

use crate::crawler::parser::extract_body;
use crate::crawler::report::CancelToken;
use futures::stream::{self, StreamExt};
use reqwest::Client;

/// Default number of concurrent workers
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Fetches each URL with at most `concurrency` requests in flight
///
/// # Arguments
///
/// * `client` - Shared HTTP client (carries user agent and timeout)
/// * `urls` - URLs to fetch; the output index i corresponds to `urls[i]`
/// * `concurrency` - Worker bound; values below 1 are clamped to 1
/// * `cancel` - Tasks observed after cancellation resolve to `None`
///
/// # Returns
///
/// One entry per input URL, in input order: the response body for
/// successful (2xx) fetches, `None` for failures or cancelled tasks.
pub async fn fetch_ordered(
    client: &Client,
    urls: &[String],
    concurrency: usize,
    cancel: &CancelToken,
) -> Vec<Option<String>> {
    stream::iter(urls.iter().cloned())
        .map(|url| {
            let client = client.clone();
            let cancel = cancel.clone();
            async move {
                if cancel.is_cancelled() {
                    return None;
                }
                match client.get(&url).send().await {
                    Ok(response) if response.status().is_success() => response.text().await.ok(),
                    Ok(response) => {
                        tracing::debug!("Fetch of {} returned {}", url, response.status());
                        None
                    }
                    Err(e) => {
                        tracing::debug!("Fetch of {} failed: {}", url, e);
                        None
                    }
                }
            }
        })
        .buffered(concurrency.max(1))
        .collect()
        .await
}

/// Fetches each URL and reduces it to its main article text
///
/// Same ordering and failure contract as [`fetch_ordered`]; successful
/// bodies are run through [`extract_body`], so navigation, scripts, and
/// other page chrome never reach the caller.
pub async fn fetch_bodies(
    client: &Client,
    urls: &[String],
    concurrency: usize,
    cancel: &CancelToken,
) -> Vec<Option<String>> {
    fetch_ordered(client, urls, concurrency, cancel)
        .await
        .into_iter()
        .map(|body| body.map(|html| extract_body(&html)))
        .collect()
}
