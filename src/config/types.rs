use serde::Deserialize;

/// Output format for persisted crawl results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Csv,
    Both,
}

impl OutputFormat {
    /// Returns true if JSON output should be written
    pub fn wants_json(&self) -> bool {
        matches!(self, Self::Json | Self::Both)
    }

    /// Returns true if CSV output should be written
    pub fn wants_csv(&self) -> bool {
        matches!(self, Self::Csv | Self::Both)
    }
}

/// Immutable parameters for one crawl session
///
/// Constructed once before a run (from CLI flags, a TOML file, or both)
/// and read-only for its duration.
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// URL the breadth-first traversal starts from
    #[serde(rename = "seed-url")]
    pub seed_url: String,

    /// Maximum link depth from the seed
    #[serde(rename = "max-depth", default = "default_max_depth")]
    pub max_depth: u32,

    /// Maximum number of pages to crawl
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: usize,

    /// Minimum time between any two requests, in seconds (global, not per-host)
    #[serde(rename = "delay", default = "default_delay")]
    pub delay_secs: f64,

    /// Per-request timeout in seconds
    #[serde(rename = "timeout", default = "default_timeout")]
    pub timeout_secs: u64,

    /// Additional attempts after a failed request
    #[serde(default = "default_retries")]
    pub retries: u32,

    /// Whether to honor robots.txt
    #[serde(rename = "respect-robots", default = "default_true")]
    pub respect_robots: bool,

    /// Whether to restrict the crawl to the seed's host
    #[serde(rename = "same-domain", default = "default_true")]
    pub same_domain: bool,

    /// Regex allowlist; when non-empty a URL must match at least one pattern
    #[serde(rename = "url-patterns", default)]
    pub url_patterns: Vec<String>,

    /// Output format for persisted results
    #[serde(rename = "output-format", default = "default_format")]
    pub output_format: OutputFormat,

    /// Directory crawl and keyword artifacts are written to
    #[serde(rename = "output-dir", default = "default_output_dir")]
    pub output_dir: String,

    /// User agent sent with every request, including robots.txt fetches
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Query keyword for the offline analysis pass; empty disables it
    #[serde(default)]
    pub keyword: String,
}

fn default_max_depth() -> u32 {
    2
}

fn default_max_pages() -> usize {
    100
}

fn default_delay() -> f64 {
    1.0
}

fn default_timeout() -> u64 {
    10
}

fn default_retries() -> u32 {
    2
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Json
}

fn default_output_dir() -> String {
    "output".to_string()
}

fn default_user_agent() -> String {
    "Webrank/1.0 (+https://github.com/example/webrank)".to_string()
}

impl CrawlConfig {
    /// Creates a config with all defaults for the given seed URL
    pub fn new(seed_url: impl Into<String>) -> Self {
        Self {
            seed_url: seed_url.into(),
            max_depth: default_max_depth(),
            max_pages: default_max_pages(),
            delay_secs: default_delay(),
            timeout_secs: default_timeout(),
            retries: default_retries(),
            respect_robots: true,
            same_domain: true,
            url_patterns: Vec::new(),
            output_format: default_format(),
            output_dir: default_output_dir(),
            user_agent: default_user_agent(),
            keyword: String::new(),
        }
    }
}
