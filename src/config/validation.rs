use crate::config::types::CrawlConfig;
use crate::{ConfigError, ConfigResult};
use regex::Regex;
use url::Url;

/// Validates the entire configuration
///
/// Configuration errors surface here, before the engine loop begins.
pub fn validate(config: &CrawlConfig) -> ConfigResult<()> {
    validate_seed_url(&config.seed_url)?;
    validate_limits(config)?;
    validate_patterns(&config.url_patterns)?;
    validate_user_agent(&config.user_agent)?;
    Ok(())
}

/// Validates the seed URL: parseable, http(s) scheme, has a host
fn validate_seed_url(seed: &str) -> ConfigResult<()> {
    let url = Url::parse(seed).map_err(|e| ConfigError::InvalidSeed {
        url: seed.to_string(),
        reason: e.to_string(),
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidSeed {
            url: seed.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidSeed {
            url: seed.to_string(),
            reason: "missing host".to_string(),
        });
    }

    Ok(())
}

/// Validates numeric limits
fn validate_limits(config: &CrawlConfig) -> ConfigResult<()> {
    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout must be >= 1s, got {}s",
            config.timeout_secs
        )));
    }

    if !config.delay_secs.is_finite() || config.delay_secs < 0.0 {
        return Err(ConfigError::Validation(format!(
            "delay must be a non-negative number, got {}",
            config.delay_secs
        )));
    }

    Ok(())
}

/// Validates that every URL pattern compiles as a regex
fn validate_patterns(patterns: &[String]) -> ConfigResult<()> {
    for pattern in patterns {
        Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern {
            pattern: pattern.clone(),
            source: e,
        })?;
    }
    Ok(())
}

/// Validates the user agent string
fn validate_user_agent(user_agent: &str) -> ConfigResult<()> {
    if user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let config = CrawlConfig::new("https://example.com/");
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_http_seed_accepted() {
        let config = CrawlConfig::new("http://example.com/start");
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_invalid_seed_rejected() {
        let config = CrawlConfig::new("not a url");
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidSeed { .. })
        ));
    }

    #[test]
    fn test_ftp_seed_rejected() {
        let config = CrawlConfig::new("ftp://example.com/");
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidSeed { .. })
        ));
    }

    #[test]
    fn test_zero_max_pages_rejected() {
        let mut config = CrawlConfig::new("https://example.com/");
        config.max_pages = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_negative_delay_rejected() {
        let mut config = CrawlConfig::new("https://example.com/");
        config.delay_secs = -1.0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_bad_pattern_rejected() {
        let mut config = CrawlConfig::new("https://example.com/");
        config.url_patterns = vec!["[unclosed".to_string()];
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_good_patterns_accepted() {
        let mut config = CrawlConfig::new("https://example.com/");
        config.url_patterns = vec![r"/news/".to_string(), r"\.html$".to_string()];
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_empty_user_agent_rejected() {
        let mut config = CrawlConfig::new("https://example.com/");
        config.user_agent = "  ".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }
}
