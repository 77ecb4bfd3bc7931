//! Rate-limited HTTP fetcher with bounded retries
//!
//! All failure modes collapse into the `(None, status_code)` contract:
//! a non-HTML response returns `(None, status)` without retrying, an
//! unreachable server returns `(None, 0)` after exhausting retries, and
//! any HTML body returns `(Some(body), status)` regardless of the status
//! code value. The fetcher never returns an error.

use crate::config::CrawlConfig;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use tokio::time::Instant;

/// Delay before retrying a failed attempt, separate from the rate limiter
const RETRY_BACKOFF: Duration = Duration::from_secs(1);

/// Issues rate-limited GET requests with retry logic
pub struct Fetcher {
    client: Client,
    delay: Duration,
    retries: u32,
    last_request: Option<Instant>,
}

impl Fetcher {
    /// Builds a fetcher from the crawl configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Fetcher)` - Client built with the configured user agent and timeout
    /// * `Err(reqwest::Error)` - Failed to build the HTTP client
    pub fn new(config: &CrawlConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            delay: Duration::from_secs_f64(config.delay_secs),
            retries: config.retries,
            last_request: None,
        })
    }

    /// Fetches a URL, returning the HTML body and status code
    ///
    /// Attempts up to `1 + retries` times. Before every attempt the rate
    /// limiter sleeps so that at least `delay` has passed since the previous
    /// request made through this instance (global, not per-host).
    pub async fn fetch(&mut self, url: &str) -> (Option<String>, u16) {
        for attempt in 0..=self.retries {
            self.rate_limit().await;
            tracing::debug!("Fetching {} (attempt {})", url, attempt + 1);

            match self.client.get(url).send().await {
                Ok(response) => {
                    let status = response.status().as_u16();
                    let content_type = response
                        .headers()
                        .get(CONTENT_TYPE)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("")
                        .to_string();

                    // Non-HTML is a content-type mismatch, not a fetch
                    // failure: no retry.
                    if !content_type.contains("text/html") {
                        tracing::debug!("Skipping non-HTML content: {}", content_type);
                        return (None, status);
                    }

                    match response.text().await {
                        Ok(body) => return (Some(body), status),
                        Err(e) => {
                            tracing::warn!("Failed to read body for {}: {}", url, e);
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!("Request failed for {}: {}", url, e);
                }
            }

            if attempt < self.retries {
                tokio::time::sleep(RETRY_BACKOFF).await;
            }
        }

        (None, 0)
    }

    /// Sleeps until at least `delay` has passed since the previous request
    async fn rate_limit(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.delay {
                tokio::time::sleep(self.delay - elapsed).await;
            }
        }
        self.last_request = Some(Instant::now());
    }
}
