//! Webrank main entry point
//!
//! This is the command-line interface for the webrank crawler and
//! keyword analyzer.

use anyhow::{bail, Context};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use webrank::analyzer::{analyze_details, KeywordAnalyzer};
use webrank::config::{load_config, OutputFormat};
use webrank::crawler::pool;
use webrank::storage::{HistoryEntry, Storage};
use webrank::{CancelToken, CrawlConfig, CrawlEngine, CrawlProgress, CrawlResult, EventKind};

/// Webrank: a breadth-first crawler with keyword analysis
///
/// Webrank crawls outward from a seed URL while respecting robots.txt,
/// rate limits, and domain scoping, then optionally ranks the vocabulary
/// of the crawled pages against a query keyword.
#[derive(Parser, Debug)]
#[command(name = "webrank")]
#[command(version = "1.0.0")]
#[command(about = "A breadth-first crawler with keyword analysis", long_about = None)]
struct Cli {
    /// Seed URL to start crawling from (omit when using --config)
    #[arg(value_name = "URL")]
    url: Option<String>,

    /// Path to TOML configuration file; CLI flags override its values
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum link depth from the seed
    #[arg(short = 'd', long)]
    max_depth: Option<u32>,

    /// Maximum number of pages to crawl
    #[arg(short = 'n', long)]
    max_pages: Option<usize>,

    /// Minimum seconds between any two requests
    #[arg(long)]
    delay: Option<f64>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Additional attempts after a failed request
    #[arg(long)]
    retries: Option<u32>,

    /// Ignore robots.txt
    #[arg(long)]
    no_robots: bool,

    /// Follow links outside the seed's domain
    #[arg(long)]
    allow_external: bool,

    /// Regex allowlist pattern; may be repeated. URLs must match one.
    #[arg(long = "url-pattern", value_name = "REGEX")]
    url_patterns: Vec<String>,

    /// Output format: json, csv, or both
    #[arg(short = 'f', long, value_name = "FORMAT")]
    format: Option<String>,

    /// Directory crawl artifacts are written to
    #[arg(short = 'o', long, value_name = "DIR")]
    output_dir: Option<String>,

    /// Query keyword for the analysis pass after the crawl
    #[arg(short = 'k', long)]
    keyword: Option<String>,

    /// Analyze only headlines instead of full page text
    #[arg(long, requires = "keyword")]
    headlines_only: bool,

    /// Number of related keywords to report
    #[arg(long, default_value_t = webrank::analyzer::DEFAULT_TOP_N)]
    top_n: usize,

    /// TF-IDF share of the blended keyword score, between 0.0 and 1.0
    #[arg(long, default_value_t = webrank::analyzer::DEFAULT_WEIGHT)]
    weight: f64,

    /// Keyword to count per page in a detail breakdown; may be repeated
    #[arg(long = "detail-keyword", value_name = "KEYWORD")]
    detail_keywords: Vec<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;

    let cancel = CancelToken::new();
    let ctrlc_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, finishing current page and stopping");
            ctrlc_cancel.cancel();
        }
    });

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<CrawlProgress>();
    let progress_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            log_progress(&event);
        }
    });

    tracing::info!("Starting crawl from {}", config.seed_url);
    let engine = CrawlEngine::new(config.clone(), Some(tx), cancel.clone())
        .context("failed to initialize crawler")?;
    let result = engine.run().await;
    let _ = progress_task.await;

    tracing::info!(
        "Crawl finished: {} pages crawled, {} failed",
        result.total_crawled,
        result.total_failed
    );

    persist_and_analyze(&cli, &config, &result, &cancel).await?;

    Ok(())
}

/// Merges the optional TOML config file with CLI flag overrides
fn build_config(cli: &Cli) -> anyhow::Result<CrawlConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => match &cli.url {
            Some(url) => CrawlConfig::new(url.clone()),
            None => bail!("a seed URL or --config file is required"),
        },
    };

    // A positional URL beats the config file's seed
    if let Some(url) = &cli.url {
        config.seed_url = url.clone();
    }
    if let Some(depth) = cli.max_depth {
        config.max_depth = depth;
    }
    if let Some(pages) = cli.max_pages {
        config.max_pages = pages;
    }
    if let Some(delay) = cli.delay {
        config.delay_secs = delay;
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }
    if let Some(retries) = cli.retries {
        config.retries = retries;
    }
    if cli.no_robots {
        config.respect_robots = false;
    }
    if cli.allow_external {
        config.same_domain = false;
    }
    if !cli.url_patterns.is_empty() {
        config.url_patterns = cli.url_patterns.clone();
    }
    if let Some(format) = &cli.format {
        config.output_format = parse_format(format)?;
    }
    if let Some(dir) = &cli.output_dir {
        config.output_dir = dir.clone();
    }
    if let Some(keyword) = &cli.keyword {
        config.keyword = keyword.clone();
    }

    webrank::config::validate(&config).context("invalid configuration")?;
    Ok(config)
}

fn parse_format(value: &str) -> anyhow::Result<OutputFormat> {
    match value.to_lowercase().as_str() {
        "json" => Ok(OutputFormat::Json),
        "csv" => Ok(OutputFormat::Csv),
        "both" => Ok(OutputFormat::Both),
        other => bail!("unknown output format '{other}' (expected json, csv, or both)"),
    }
}

/// Writes crawl artifacts and, when keywords are set, the analysis reports
async fn persist_and_analyze(
    cli: &Cli,
    config: &CrawlConfig,
    result: &CrawlResult,
    cancel: &CancelToken,
) -> anyhow::Result<()> {
    let storage = Storage::new(&config.output_dir).context("failed to open output directory")?;
    let mut output_files = Vec::new();

    if config.output_format.wants_json() {
        let path = storage.save_json(result)?;
        tracing::info!("Saved crawl results to {}", path.display());
        output_files.push(path.display().to_string());
    }
    if config.output_format.wants_csv() {
        let path = storage.save_csv(result)?;
        tracing::info!("Saved crawl results to {}", path.display());
        output_files.push(path.display().to_string());
    }

    if !config.keyword.is_empty() {
        let documents: Vec<String> = if cli.headlines_only {
            result
                .pages
                .iter()
                .map(|p| p.headlines.join(" "))
                .collect()
        } else {
            result.pages.iter().map(|p| p.full_text.clone()).collect()
        };

        let analyzer = KeywordAnalyzer::new()
            .with_top_n(cli.top_n)
            .with_weight(cli.weight);
        let report = analyzer.analyze(&documents, &config.keyword);

        println!(
            "\nKeywords related to '{}' ({} of {} pages contain it):",
            report.query_keyword, report.pages_containing_query, report.total_pages_analyzed
        );
        for (i, score) in report.related_keywords.iter().enumerate() {
            println!(
                "  {:>3}. {:<20} score {:.4} (freq {}, co-occ {})",
                i + 1,
                score.keyword,
                score.combined_score,
                score.frequency,
                score.co_occurrence
            );
        }

        if config.output_format.wants_json() {
            let path = storage.save_keywords_json(&report)?;
            tracing::info!("Saved keyword report to {}", path.display());
            output_files.push(path.display().to_string());
        }
        if config.output_format.wants_csv() {
            let path = storage.save_keywords_csv(&report)?;
            tracing::info!("Saved keyword report to {}", path.display());
            output_files.push(path.display().to_string());
        }
    }

    if !cli.detail_keywords.is_empty() && !result.pages.is_empty() {
        let detail = run_detail_analysis(cli, config, result, cancel).await?;

        println!("\nKeyword occurrences across {} pages:", detail.pages.len());
        for keyword in &detail.keywords {
            println!(
                "  {:<20} {}",
                keyword,
                detail.totals.get(keyword).copied().unwrap_or(0)
            );
        }

        if config.output_format.wants_json() {
            let path = storage.save_detail_json(&detail)?;
            tracing::info!("Saved detail report to {}", path.display());
            output_files.push(path.display().to_string());
        }
        if config.output_format.wants_csv() {
            let path = storage.save_detail_csv(&detail)?;
            tracing::info!("Saved detail report to {}", path.display());
            output_files.push(path.display().to_string());
        }
    }

    storage.append_history(HistoryEntry {
        timestamp: chrono::Local::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
        seed_url: config.seed_url.clone(),
        pages_crawled: result.total_crawled,
        pages_failed: result.total_failed,
        keyword: (!config.keyword.is_empty()).then(|| config.keyword.clone()),
        output_files,
    })?;

    println!(
        "\n✓ Crawled {} pages ({} failed) from {}",
        result.total_crawled, result.total_failed, result.seed_url
    );

    Ok(())
}

/// Counts the detail keywords per page over refetched article bodies
///
/// Pages are refetched concurrently and reduced to their main article
/// text, so navigation and other page chrome never inflate the counts;
/// pages whose refetch fails fall back to the crawl's extracted text.
async fn run_detail_analysis(
    cli: &Cli,
    config: &CrawlConfig,
    result: &CrawlResult,
    cancel: &CancelToken,
) -> anyhow::Result<webrank::analyzer::DetailReport> {
    let client = reqwest::Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .context("failed to build detail fetch client")?;

    let urls: Vec<String> = result.pages.iter().map(|p| p.url.clone()).collect();
    tracing::info!("Fetching {} article bodies for detail analysis", urls.len());
    let bodies = pool::fetch_bodies(&client, &urls, pool::DEFAULT_CONCURRENCY, cancel).await;

    let pages: Vec<webrank::PageRecord> = result
        .pages
        .iter()
        .zip(bodies)
        .map(|(page, body)| {
            let mut page = page.clone();
            if let Some(body) = body {
                page.full_text = body;
            }
            page
        })
        .collect();

    Ok(analyze_details(&pages, &cli.detail_keywords))
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("webrank=info,warn"),
            1 => EnvFilter::new("webrank=debug,info"),
            2 => EnvFilter::new("webrank=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

fn log_progress(event: &CrawlProgress) {
    match event.event_type {
        EventKind::Crawled => tracing::debug!(
            "[{}/{}] crawled {} (depth {})",
            event.pages_crawled,
            event.max_pages,
            event.current_url,
            event.current_depth
        ),
        EventKind::Blocked => tracing::info!("blocked by robots.txt: {}", event.current_url),
        EventKind::Failed => tracing::warn!(
            "failed (status {}): {}",
            event.status_code,
            event.current_url
        ),
    }
}
