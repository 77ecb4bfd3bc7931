//! Webrank: a breadth-first web crawler with keyword-relevance analysis
//!
//! This crate crawls pages starting from a seed URL, respecting robots.txt,
//! rate limits, and domain scoping, and scores the extracted vocabulary
//! against a query keyword with a blended TF-IDF / co-occurrence metric.

pub mod analyzer;
pub mod config;
pub mod crawler;
pub mod robots;
pub mod storage;

use thiserror::Error;

/// Main error type for webrank operations
#[derive(Debug, Error)]
pub enum WebrankError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid seed URL '{url}': {reason}")]
    InvalidSeed { url: String, reason: String },

    #[error("Invalid URL pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
}

/// Result type alias for webrank operations
pub type Result<T> = std::result::Result<T, WebrankError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use analyzer::{KeywordAnalyzer, KeywordReport, KeywordScore};
pub use config::CrawlConfig;
pub use crawler::{CancelToken, CrawlEngine, CrawlProgress, CrawlResult, EventKind, PageRecord};
