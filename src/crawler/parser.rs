//! Stateless HTML extraction: title, metadata, text, links, headlines
//!
//! Malformed HTML degrades gracefully: missing elements yield empty
//! values, never an error that aborts the page.

use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Number of characters kept in the text preview
const PREVIEW_CHARS: usize = 500;

/// Minimum length for a heading or link text to count as a headline
const MIN_HEADLINE_CHARS: usize = 8;

/// Tags whose text never belongs to an article body
const CHROME_TAGS: &[&str] = &["script", "style", "nav", "header", "footer", "aside"];

/// Minimum visible length for a div to qualify as the main content
const MIN_BODY_CHARS: usize = 100;

/// Everything extracted from one HTML document
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    /// Trimmed content of the document title element, or empty
    pub title: String,

    /// Trimmed `content` of `<meta name="description">`, or empty
    pub meta_description: String,

    /// First 500 characters of `full_text`
    pub text_preview: String,

    /// All visible text, whitespace-normalized
    pub full_text: String,

    /// Absolute link targets in document order; duplicates allowed
    /// (dedup is the filter's job)
    pub links: Vec<String>,

    /// Candidate article/post titles from headings and link texts
    pub headlines: Vec<String>,
}

/// Parses an HTML document and extracts structured data
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - Base for resolving relative link targets
pub fn parse_page(html: &str, base_url: &Url) -> ParsedPage {
    let document = Html::parse_document(html);

    let title = extract_title(&document);
    let meta_description = extract_meta_description(&document);

    let full_text = extract_full_text(&document);
    let text_preview: String = full_text.chars().take(PREVIEW_CHARS).collect();

    let links = extract_links(&document, base_url);
    let headlines = extract_headlines(&document);

    ParsedPage {
        title,
        meta_description,
        text_preview,
        full_text,
        links,
        headlines,
    }
}

fn extract_title(document: &Html) -> String {
    let Ok(selector) = Selector::parse("title") else {
        return String::new();
    };
    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

fn extract_meta_description(document: &Html) -> String {
    let Ok(selector) = Selector::parse(r#"meta[name="description"]"#) else {
        return String::new();
    };
    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr("content"))
        .map(|content| content.trim().to_string())
        .unwrap_or_default()
}

/// Collects every text node and normalizes whitespace to single spaces
fn extract_full_text(document: &Html) -> String {
    let raw: String = document
        .root_element()
        .text()
        .collect::<Vec<_>>()
        .join(" ");
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extracts anchor targets, resolved to absolute URLs with fragments stripped
///
/// `javascript:`, `mailto:`, `tel:`, and pure-fragment targets are skipped.
/// Order is preserved and duplicates are allowed.
fn extract_links(document: &Html, base_url: &Url) -> Vec<String> {
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let mut links = Vec::new();
    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let href = href.trim();

        if href.starts_with("javascript:")
            || href.starts_with("mailto:")
            || href.starts_with("tel:")
            || href.starts_with('#')
        {
            continue;
        }

        if let Ok(mut absolute) = base_url.join(href) {
            absolute.set_fragment(None);
            links.push(absolute.to_string());
        }
    }
    links
}

/// Builds the ordered, deduplicated headline list
///
/// Pass 1 takes every h1/h2/h3 text of at least 8 characters in document
/// order; pass 2 adds anchor texts of the same minimum length that are not
/// bare URLs and were not already captured. Headings win over generic
/// links, while link-only title patterns common on index pages still
/// surface.
fn extract_headlines(document: &Html) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut headlines = Vec::new();

    if let Ok(selector) = Selector::parse("h1, h2, h3") {
        for element in document.select(&selector) {
            let text = normalize_text(&element.text().collect::<String>());
            if text.chars().count() >= MIN_HEADLINE_CHARS && seen.insert(text.clone()) {
                headlines.push(text);
            }
        }
    }

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            let text = normalize_text(&element.text().collect::<String>());
            if text.chars().count() < MIN_HEADLINE_CHARS {
                continue;
            }
            if text.starts_with("http://") || text.starts_with("https://") || text.starts_with("www.")
            {
                continue;
            }
            if seen.insert(text.clone()) {
                headlines.push(text);
            }
        }
    }

    headlines
}

fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extracts the main article text from a full HTML page
///
/// Script, style, and page-chrome subtrees (nav, header, footer, aside)
/// are ignored throughout. An `<article>` element wins when present;
/// otherwise the `<div>` with the most visible text is taken if it holds
/// at least 100 characters; otherwise the whole `<body>` text is the
/// last resort. The result is whitespace-normalized like `full_text`.
pub fn extract_body(html: &str) -> String {
    let document = Html::parse_document(html);

    if let Ok(selector) = Selector::parse("article") {
        if let Some(article) = document.select(&selector).next() {
            return visible_text(article);
        }
    }

    if let Ok(selector) = Selector::parse("div") {
        let best = document
            .select(&selector)
            .map(visible_text)
            .max_by_key(|text| text.chars().count());
        if let Some(text) = best {
            if text.chars().count() > MIN_BODY_CHARS {
                return text;
            }
        }
    }

    if let Ok(selector) = Selector::parse("body") {
        if let Some(body) = document.select(&selector).next() {
            return visible_text(body);
        }
    }

    String::new()
}

/// Collects an element's text, skipping chrome subtrees, and normalizes it
fn visible_text(root: scraper::ElementRef) -> String {
    let mut out = String::new();
    for node in root.descendants() {
        let scraper::node::Node::Text(text) = node.value() else {
            continue;
        };
        let in_chrome = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .map(|e| CHROME_TAGS.contains(&e.name()))
                .unwrap_or(false)
        });
        if !in_chrome {
            out.push_str(text);
            out.push(' ');
        }
    }
    normalize_text(&out)
}
