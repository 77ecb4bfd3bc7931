//! URL filtering: scheme and domain constraints, pattern allowlist, dedup
//!
//! The filter decides which newly discovered URLs may enter the frontier
//! and guarantees no URL is ever admitted twice within a session. It is a
//! pure in-memory component with a single owner (the engine); it does no
//! I/O and is deliberately not thread-safe.

use crate::ConfigError;
use regex::Regex;
use std::collections::HashSet;
use url::Url;

/// Filters candidate URLs by scheme, host, and pattern, and tracks seen URLs
pub struct UrlFilter {
    seed_host: String,
    same_domain: bool,
    patterns: Vec<Regex>,
    seen: HashSet<String>,
}

impl UrlFilter {
    /// Creates a filter scoped to the given seed URL
    ///
    /// # Arguments
    ///
    /// * `seed_url` - The crawl's seed; its host anchors the same-domain check
    /// * `same_domain` - Reject URLs whose host differs from the seed's
    /// * `patterns` - Regex allowlist; when non-empty a URL must match one
    ///
    /// # Returns
    ///
    /// * `Ok(UrlFilter)` - Ready to use
    /// * `Err(ConfigError)` - Seed does not parse or a pattern does not compile
    pub fn new(seed_url: &str, same_domain: bool, patterns: &[String]) -> Result<Self, ConfigError> {
        let seed = Url::parse(seed_url).map_err(|e| ConfigError::InvalidSeed {
            url: seed_url.to_string(),
            reason: e.to_string(),
        })?;
        let seed_host = seed.host_str().unwrap_or_default().to_string();

        let patterns = patterns
            .iter()
            .map(|p| {
                Regex::new(p).map_err(|e| ConfigError::InvalidPattern {
                    pattern: p.clone(),
                    source: e,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            seed_host,
            same_domain,
            patterns,
            seen: HashSet::new(),
        })
    }

    /// Returns the candidates that pass every filter, in input order
    ///
    /// Accepted URLs are marked seen immediately, so repeating a batch (or
    /// a duplicate within one batch) yields nothing the second time.
    pub fn filter(&mut self, urls: &[String]) -> Vec<String> {
        let mut accepted = Vec::new();
        for url in urls {
            if self.seen.contains(url) {
                continue;
            }
            if !Self::is_valid_scheme(url) {
                continue;
            }
            if self.same_domain && !self.is_same_domain(url) {
                continue;
            }
            if !self.patterns.is_empty() && !self.matches_pattern(url) {
                continue;
            }
            self.seen.insert(url.clone());
            accepted.push(url.clone());
        }
        accepted
    }

    /// Marks a URL seen without filtering it (used for the seed)
    pub fn mark_seen(&mut self, url: &str) {
        self.seen.insert(url.to_string());
    }

    /// Returns true if the URL was ever admitted or marked seen
    pub fn is_seen(&self, url: &str) -> bool {
        self.seen.contains(url)
    }

    fn is_valid_scheme(url: &str) -> bool {
        match Url::parse(url) {
            Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
            Err(_) => false,
        }
    }

    fn is_same_domain(&self, url: &str) -> bool {
        Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(|h| h == self.seed_host))
            .unwrap_or(false)
    }

    fn matches_pattern(&self, url: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(url))
    }
}
