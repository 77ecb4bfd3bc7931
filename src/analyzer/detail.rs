//! Per-page keyword frequency breakdown
//!
//! Unlike the ranking analyzer, this pass takes a fixed list of keywords
//! and counts literal occurrences of each on every page, so a reader can
//! see where the vocabulary actually concentrates.

use crate::crawler::PageRecord;
use serde::Serialize;
use std::collections::HashMap;

/// Occurrence counts for one page
#[derive(Debug, Clone, Serialize)]
pub struct PageKeywordCounts {
    pub url: String,
    pub title: String,
    /// keyword -> number of occurrences in the page text
    pub counts: HashMap<String, usize>,
    /// Sum over all tracked keywords
    pub total: usize,
}

/// Keyword occurrence breakdown over a page collection
#[derive(Debug, Clone, Serialize)]
pub struct DetailReport {
    pub keywords: Vec<String>,
    pub pages: Vec<PageKeywordCounts>,
    /// keyword -> occurrences summed over all pages
    pub totals: HashMap<String, usize>,
}

/// Counts non-overlapping, case-insensitive occurrences of `needle`
fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    let haystack = haystack.to_lowercase();
    let needle = needle.to_lowercase();
    haystack.matches(&needle).count()
}

/// Builds a per-page breakdown of the given keywords
///
/// Pages are reported in input order; a page with zero matches still
/// appears, with all counts at zero.
pub fn analyze_details(pages: &[PageRecord], keywords: &[String]) -> DetailReport {
    let mut totals: HashMap<String, usize> = keywords.iter().map(|k| (k.clone(), 0)).collect();

    let page_counts = pages
        .iter()
        .map(|page| {
            let mut counts = HashMap::new();
            let mut total = 0;
            for keyword in keywords {
                let n = count_occurrences(&page.full_text, keyword);
                counts.insert(keyword.clone(), n);
                total += n;
                *totals.entry(keyword.clone()).or_default() += n;
            }
            PageKeywordCounts {
                url: page.url.clone(),
                title: page.title.clone(),
                counts,
                total,
            }
        })
        .collect();

    DetailReport {
        keywords: keywords.to_vec(),
        pages: page_counts,
        totals,
    }
}
