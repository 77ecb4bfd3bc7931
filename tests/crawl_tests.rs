//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use webrank::analyzer::KeywordAnalyzer;
use webrank::{CancelToken, CrawlConfig, CrawlEngine, EventKind};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
fn create_test_config(seed_url: &str) -> CrawlConfig {
    let mut config = CrawlConfig::new(seed_url);
    config.delay_secs = 0.0; // No rate limiting in tests
    config.timeout_secs = 5;
    config.retries = 0;
    config
}

fn html_page(title: &str, body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(
        format!("<html><head><title>{title}</title></head><body>{body}</body></html>"),
        "text/html; charset=utf-8",
    )
}

async fn mount_allow_all_robots(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nAllow: /"))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_follows_links_one_level() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_allow_all_robots(&server).await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            "Home",
            &format!(
                r#"<a href="{base}/a">Article A</a>
                   <a href="{base}/b">Article B</a>
                   <a href="{base}/c">Article C</a>"#
            ),
        ))
        .mount(&server)
        .await;
    for p in ["/a", "/b", "/c"] {
        Mock::given(method("GET"))
            .and(path(p))
            .respond_with(html_page("Leaf", "Leaf content here"))
            .mount(&server)
            .await;
    }

    let mut config = create_test_config(&format!("{base}/"));
    config.max_depth = 1;
    let engine = CrawlEngine::new(config, None, CancelToken::new()).unwrap();
    let result = engine.run().await;

    assert_eq!(result.total_crawled, 4);
    assert_eq!(result.total_failed, 0);
    assert_eq!(result.pages[0].depth, 0);
    assert!(result.pages[1..].iter().all(|p| p.depth == 1));
}

#[tokio::test]
async fn test_robots_disallow_blocks_seed() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /blocked"),
        )
        .mount(&server)
        .await;
    // The blocked page must never be fetched
    Mock::given(method("GET"))
        .and(path("/blocked"))
        .respond_with(html_page("Secret", "hidden"))
        .expect(0)
        .mount(&server)
        .await;

    let config = create_test_config(&format!("{base}/blocked"));
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let engine = CrawlEngine::new(config, Some(tx), CancelToken::new()).unwrap();
    let result = engine.run().await;

    assert_eq!(result.total_crawled, 0);
    let event = rx.recv().await.unwrap();
    assert_eq!(event.event_type, EventKind::Blocked);
}

#[tokio::test]
async fn test_no_robots_flag_skips_robots_entirely() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /"),
        )
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page("Open", "content"))
        .mount(&server)
        .await;

    let mut config = create_test_config(&format!("{base}/"));
    config.respect_robots = false;
    let engine = CrawlEngine::new(config, None, CancelToken::new()).unwrap();
    let result = engine.run().await;

    assert_eq!(result.total_crawled, 1);
}

#[tokio::test]
async fn test_breadth_first_order_and_no_duplicate_fetch() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_allow_all_robots(&server).await;

    // Both depth-1 pages link back to the seed and to each other
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            "Root",
            &format!(r#"<a href="{base}/one">1</a> <a href="{base}/two">2</a>"#),
        ))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/one"))
        .respond_with(html_page(
            "One",
            &format!(r#"<a href="{base}/">home</a> <a href="{base}/two">2</a> <a href="{base}/deep">d</a>"#),
        ))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/two"))
        .respond_with(html_page("Two", "no links"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/deep"))
        .respond_with(html_page("Deep", "depth two"))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = create_test_config(&format!("{base}/"));
    config.max_depth = 2;
    let engine = CrawlEngine::new(config, None, CancelToken::new()).unwrap();
    let result = engine.run().await;

    assert_eq!(result.total_crawled, 4);
    // Depths never decrease along the visit order
    let depths: Vec<u32> = result.pages.iter().map(|p| p.depth).collect();
    let mut sorted = depths.clone();
    sorted.sort_unstable();
    assert_eq!(depths, sorted);
}

#[tokio::test]
async fn test_depth_limit_stops_link_expansion() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_allow_all_robots(&server).await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page("Root", &format!(r#"<a href="{base}/next">n</a>"#)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/next"))
        .respond_with(html_page(
            "Next",
            &format!(r#"<a href="{base}/too-deep">x</a>"#),
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/too-deep"))
        .respond_with(html_page("TooDeep", "unreachable"))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = create_test_config(&format!("{base}/"));
    config.max_depth = 1;
    let engine = CrawlEngine::new(config, None, CancelToken::new()).unwrap();
    let result = engine.run().await;

    assert_eq!(result.total_crawled, 2);
}

#[tokio::test]
async fn test_external_links_skipped_by_default() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_allow_all_robots(&server).await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            "Root",
            r#"<a href="http://external.invalid/page">away</a>"#,
        ))
        .mount(&server)
        .await;

    let mut config = create_test_config(&format!("{base}/"));
    config.max_depth = 1;
    let engine = CrawlEngine::new(config, None, CancelToken::new()).unwrap();
    let result = engine.run().await;

    // The external link is counted on the page but never crawled
    assert_eq!(result.total_crawled, 1);
    assert_eq!(result.pages[0].links_found, 1);
    assert_eq!(result.total_failed, 0);
}

#[tokio::test]
async fn test_failed_page_recorded_and_crawl_continues() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_allow_all_robots(&server).await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            "Root",
            &format!(r#"<a href="{base}/pdf">doc</a> <a href="{base}/ok">fine</a>"#),
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("%PDF-1.4", "application/pdf"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(html_page("Fine", "still crawled"))
        .mount(&server)
        .await;

    let mut config = create_test_config(&format!("{base}/"));
    config.max_depth = 1;
    let engine = CrawlEngine::new(config, None, CancelToken::new()).unwrap();
    let result = engine.run().await;

    assert_eq!(result.total_crawled, 2);
    assert_eq!(result.total_failed, 1);
    assert!(result.failed_urls[0].url.ends_with("/pdf"));
    assert_eq!(result.failed_urls[0].status_code, 200);
}

#[tokio::test]
async fn test_crawl_then_analyze_korean_content() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_allow_all_robots(&server).await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            "뉴스",
            &format!(
                r#"<p>한국 경제 성장 전망</p> <a href="{base}/markets">markets</a>"#
            ),
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/markets"))
        .respond_with(html_page("증시", "<p>한국 주식 시장 상승</p>"))
        .mount(&server)
        .await;

    let mut config = create_test_config(&format!("{base}/"));
    config.max_depth = 1;
    let engine = CrawlEngine::new(config, None, CancelToken::new()).unwrap();
    let result = engine.run().await;
    assert_eq!(result.total_crawled, 2);

    let documents: Vec<String> = result.pages.iter().map(|p| p.full_text.clone()).collect();
    let report = KeywordAnalyzer::new().analyze(&documents, "한국");

    assert_eq!(report.total_pages_analyzed, 2);
    assert_eq!(report.pages_containing_query, 2);
    assert!(report.related_keywords.iter().any(|k| k.keyword == "경제"));
    assert!(report.related_keywords.iter().any(|k| k.keyword == "주식"));
    assert!(report.related_keywords.iter().all(|k| k.keyword != "한국"));
}

#[tokio::test]
async fn test_url_pattern_allowlist_restricts_frontier() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_allow_all_robots(&server).await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            "Root",
            &format!(r#"<a href="{base}/news/1">n</a> <a href="{base}/ads/1">a</a>"#),
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/news/1"))
        .respond_with(html_page("News", "article"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/ads/1"))
        .respond_with(html_page("Ad", "spam"))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = create_test_config(&format!("{base}/"));
    config.max_depth = 1;
    config.url_patterns = vec!["/news/".to_string()];
    let engine = CrawlEngine::new(config, None, CancelToken::new()).unwrap();
    let result = engine.run().await;

    assert_eq!(result.total_crawled, 2);
}

/// Serves a page and flips the cancel flag as a side effect, so the
/// engine observes cancellation before it can start the next fetch
struct CancelOnServe {
    token: CancelToken,
    template: ResponseTemplate,
}

impl wiremock::Respond for CancelOnServe {
    fn respond(&self, _request: &wiremock::Request) -> ResponseTemplate {
        self.token.cancel();
        self.template.clone()
    }
}

#[tokio::test]
async fn test_cancellation_keeps_partial_result() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_allow_all_robots(&server).await;

    let cancel = CancelToken::new();
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(CancelOnServe {
            token: cancel.clone(),
            template: html_page("Root", &format!(r#"<a href="{base}/later">later</a>"#)),
        })
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/later"))
        .respond_with(html_page("Later", "never reached"))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = create_test_config(&format!("{base}/"));
    config.max_depth = 1;
    let engine = CrawlEngine::new(config, None, cancel).unwrap();
    let result = engine.run().await;

    // The already-fetched page survives as a valid partial result
    assert_eq!(result.total_crawled, 1);
    assert_eq!(result.pages[0].title, "Root");
}

#[tokio::test]
async fn test_detail_breakdown_over_refetched_bodies() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_allow_all_robots(&server).await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            "Home",
            &format!(r#"<a href="{base}/story">Economy story</a>"#),
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/story"))
        .respond_with(html_page(
            "Story",
            r#"<nav>economy economy economy</nav>
               <article>The economy grew. Trade followed the economy.</article>"#,
        ))
        .mount(&server)
        .await;

    let mut config = create_test_config(&format!("{base}/"));
    config.max_depth = 1;
    let engine = CrawlEngine::new(config.clone(), None, CancelToken::new()).unwrap();
    let result = engine.run().await;
    assert_eq!(result.total_crawled, 2);

    let client = reqwest::Client::new();
    let cancel = CancelToken::new();
    let urls: Vec<String> = result.pages.iter().map(|p| p.url.clone()).collect();
    let bodies = webrank::crawler::pool::fetch_bodies(&client, &urls, 4, &cancel).await;
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

    let report =
        webrank::analyzer::analyze_details(&pages, &["economy".to_string(), "trade".to_string()]);

    // Counting runs over article bodies, so the nav repetitions are excluded
    let story = report
        .pages
        .iter()
        .find(|p| p.url.ends_with("/story"))
        .unwrap();
    assert_eq!(story.counts["economy"], 2);
    assert_eq!(story.counts["trade"], 1);
    assert_eq!(story.total, 3);
    // The home page's "Economy story" anchor adds one more across all pages
    assert_eq!(report.totals["economy"], 3);
    assert_eq!(report.totals["trade"], 1);
}
