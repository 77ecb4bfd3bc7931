//! Configuration module for webrank
//!
//! Crawl parameters come from CLI flags, a TOML file, or both; either way
//! the result is a validated [`CrawlConfig`] that stays read-only for the
//! duration of the run.
//!
//! # Example
//!
//! ```no_run
//! use webrank::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("webrank.toml")).unwrap();
//! println!("Crawl will stop after {} pages", config.max_pages);
//! ```

mod types;
mod validation;

pub use types::{CrawlConfig, OutputFormat};
pub use validation::validate;

use crate::ConfigResult;
use std::path::Path;

/// Loads and validates a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(CrawlConfig)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate
pub fn load_config(path: &Path) -> ConfigResult<CrawlConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: CrawlConfig = toml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}
