//! Per-origin robots.txt compliance with session-scoped caching
//!
//! The checker owns a mapping from origin (`scheme://host[:port]`) to
//! parsed rules, constructed fresh per crawl session; there is no
//! process-wide cache. An origin whose robots.txt cannot be fetched is
//! treated as fully permissive for the remainder of the session.

mod rules;

pub use rules::RobotRules;

use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// Answers allow/deny questions per URL, caching rules per origin
pub struct RobotsChecker {
    client: Client,
    user_agent: String,
    cache: HashMap<String, RobotRules>,
}

impl RobotsChecker {
    /// Creates a checker for the given user agent
    ///
    /// # Arguments
    ///
    /// * `user_agent` - Agent string the rules are evaluated against, also
    ///   sent with robots.txt requests
    /// * `timeout_secs` - Short timeout for robots.txt fetches
    pub fn new(user_agent: &str, timeout_secs: u64) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(user_agent.to_string())
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            user_agent: user_agent.to_string(),
            cache: HashMap::new(),
        })
    }

    /// Returns true if the URL may be fetched per its origin's robots.txt
    ///
    /// The first query for an origin fetches `{origin}/robots.txt`; the
    /// parsed result is cached for the rest of the session and never
    /// invalidated mid-run. Unparseable URLs are allowed through; the
    /// fetcher will fail on them with a better diagnostic.
    pub async fn is_allowed(&mut self, url: &str) -> bool {
        let Some(origin) = extract_origin(url) else {
            return true;
        };

        if !self.cache.contains_key(&origin) {
            let rules = self.fetch_rules(&origin).await;
            self.cache.insert(origin.clone(), rules);
        }

        self.cache
            .get(&origin)
            .map(|rules| rules.is_allowed(url, &self.user_agent))
            .unwrap_or(true)
    }

    /// Fetches and parses robots.txt for an origin, permissive on failure
    async fn fetch_rules(&self, origin: &str) -> RobotRules {
        let robots_url = format!("{}/robots.txt", origin);

        match self.client.get(&robots_url).send().await {
            Ok(response) if response.status().as_u16() == 200 => match response.text().await {
                Ok(content) => {
                    tracing::debug!("Loaded robots.txt from {}", robots_url);
                    RobotRules::from_content(&content)
                }
                Err(e) => {
                    tracing::debug!("Failed to read robots.txt body from {}: {}", robots_url, e);
                    RobotRules::allow_all()
                }
            },
            Ok(response) => {
                tracing::debug!(
                    "robots.txt at {} returned {}, treating as allow-all",
                    robots_url,
                    response.status()
                );
                RobotRules::allow_all()
            }
            Err(e) => {
                tracing::debug!("Failed to fetch {}: {}", robots_url, e);
                RobotRules::allow_all()
            }
        }
    }
}

/// Extracts `scheme://host[:port]` from a URL string
fn extract_origin(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    parsed.host_str()?;
    Some(parsed.origin().ascii_serialization())
}
