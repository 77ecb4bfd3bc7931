//! Parsed robots.txt rules, backed by the robotstxt crate

use robotstxt::DefaultMatcher;

/// Parsed robots.txt content for one origin
///
/// An allow-all instance stands in whenever robots.txt cannot be fetched
/// or parsed; crawling must not halt because robots.txt is unreachable.
#[derive(Debug, Clone)]
pub struct RobotRules {
    /// Raw robots.txt content (empty means allow all)
    content: String,
    /// True when the origin is fully permissive
    allow_all: bool,
}

impl RobotRules {
    /// Creates rules from raw robots.txt content
    pub fn from_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
            allow_all: false,
        }
    }

    /// Creates permissive rules that allow everything
    pub fn allow_all() -> Self {
        Self {
            content: String::new(),
            allow_all: true,
        }
    }

    /// Checks whether a URL is allowed for the given user agent
    ///
    /// Directives for the configured agent take precedence; wildcard rules
    /// apply otherwise, per standard robots semantics.
    pub fn is_allowed(&self, url: &str, user_agent: &str) -> bool {
        if self.allow_all || self.content.is_empty() {
            return true;
        }

        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.content, user_agent, url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_all() {
        let rules = RobotRules::allow_all();
        assert!(rules.is_allowed("https://example.com/any/path", "TestBot"));
        assert!(rules.is_allowed("https://example.com/admin", "TestBot"));
    }

    #[test]
    fn test_disallow_all() {
        let rules = RobotRules::from_content("User-agent: *\nDisallow: /");
        assert!(!rules.is_allowed("https://example.com/", "TestBot"));
        assert!(!rules.is_allowed("https://example.com/page", "TestBot"));
    }

    #[test]
    fn test_disallow_specific_prefix() {
        let rules = RobotRules::from_content("User-agent: *\nDisallow: /admin");
        assert!(rules.is_allowed("https://example.com/", "TestBot"));
        assert!(rules.is_allowed("https://example.com/page", "TestBot"));
        assert!(!rules.is_allowed("https://example.com/admin", "TestBot"));
        assert!(!rules.is_allowed("https://example.com/admin/users", "TestBot"));
    }

    #[test]
    fn test_allow_overrides_disallow() {
        let rules =
            RobotRules::from_content("User-agent: *\nDisallow: /private\nAllow: /private/public");
        assert!(!rules.is_allowed("https://example.com/private", "TestBot"));
        assert!(rules.is_allowed("https://example.com/private/public", "TestBot"));
    }

    #[test]
    fn test_specific_user_agent_group() {
        let rules =
            RobotRules::from_content("User-agent: BadBot\nDisallow: /\n\nUser-agent: *\nAllow: /");
        assert!(rules.is_allowed("https://example.com/page", "GoodBot"));
        assert!(!rules.is_allowed("https://example.com/page", "BadBot"));
    }

    #[test]
    fn test_garbage_content_is_permissive() {
        let rules = RobotRules::from_content("not a robots file {{{");
        assert!(rules.is_allowed("https://example.com/any", "TestBot"));
    }

    #[test]
    fn test_empty_content_is_permissive() {
        let rules = RobotRules::from_content("");
        assert!(rules.is_allowed("https://example.com/any", "TestBot"));
    }
}
