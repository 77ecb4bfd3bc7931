//! Persistence of crawl results and keyword reports
//!
//! Artifacts land in a configurable output directory with timestamped
//! names, so repeated runs never clobber each other. A `history.json`
//! file accumulates a one-entry summary per run.

use crate::analyzer::{DetailReport, KeywordReport};
use crate::crawler::CrawlResult;
use crate::Result;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const HISTORY_FILE: &str = "history.json";

/// One line in the run history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: String,
    pub seed_url: String,
    pub pages_crawled: usize,
    pub pages_failed: usize,
    pub keyword: Option<String>,
    pub output_files: Vec<String>,
}

/// Writes crawl artifacts under a single output directory
pub struct Storage {
    output_dir: PathBuf,
}

impl Storage {
    /// Creates the output directory if it does not exist
    ///
    /// # Arguments
    /// * `output_dir` - directory all artifacts are written into
    pub fn new(output_dir: impl AsRef<Path>) -> Result<Self> {
        let output_dir = output_dir.as_ref().to_path_buf();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    fn timestamped(&self, prefix: &str, ext: &str) -> PathBuf {
        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        self.output_dir.join(format!("{prefix}_{stamp}.{ext}"))
    }

    /// Saves the full crawl result as pretty-printed JSON
    ///
    /// # Returns
    /// The path of the written file.
    pub fn save_json(&self, result: &CrawlResult) -> Result<PathBuf> {
        let path = self.timestamped("crawl", "json");
        let body = serde_json::to_string_pretty(result)?;
        fs::write(&path, body)?;
        Ok(path)
    }

    /// Saves the crawled pages as a flat CSV table
    ///
    /// Failed URLs are not part of the CSV; they live in the JSON output.
    pub fn save_csv(&self, result: &CrawlResult) -> Result<PathBuf> {
        let path = self.timestamped("crawl", "csv");
        let mut out = String::from(
            "url,status_code,title,meta_description,text_preview,links_found,depth,error\n",
        );
        for page in &result.pages {
            let row = [
                csv_field(&page.url),
                page.status_code.to_string(),
                csv_field(&page.title),
                csv_field(&page.meta_description),
                csv_field(&page.text_preview),
                page.links_found.to_string(),
                page.depth.to_string(),
                csv_field(page.error.as_deref().unwrap_or("")),
            ];
            out.push_str(&row.join(","));
            out.push('\n');
        }
        fs::write(&path, out)?;
        Ok(path)
    }

    /// Saves a keyword report as pretty-printed JSON
    pub fn save_keywords_json(&self, report: &KeywordReport) -> Result<PathBuf> {
        let path = self.timestamped("keywords", "json");
        let body = serde_json::to_string_pretty(report)?;
        fs::write(&path, body)?;
        Ok(path)
    }

    /// Saves the ranked keywords as a CSV table, one row per keyword
    pub fn save_keywords_csv(&self, report: &KeywordReport) -> Result<PathBuf> {
        let path = self.timestamped("keywords", "csv");
        let mut out = String::from("rank,keyword,frequency,co_occurrence,tfidf_score\n");
        for (i, score) in report.related_keywords.iter().enumerate() {
            let row = [
                (i + 1).to_string(),
                csv_field(&score.keyword),
                score.frequency.to_string(),
                score.co_occurrence.to_string(),
                format!("{:.4}", score.tfidf_score),
            ];
            out.push_str(&row.join(","));
            out.push('\n');
        }
        fs::write(&path, out)?;
        Ok(path)
    }

    /// Saves a per-page keyword breakdown as pretty-printed JSON
    pub fn save_detail_json(&self, report: &DetailReport) -> Result<PathBuf> {
        let path = self.timestamped("detail", "json");
        let body = serde_json::to_string_pretty(report)?;
        fs::write(&path, body)?;
        Ok(path)
    }

    /// Saves a per-page keyword breakdown as a CSV table
    ///
    /// One column per tracked keyword, one row per page numbered from 1,
    /// and a final TOTAL row summing each column.
    pub fn save_detail_csv(&self, report: &DetailReport) -> Result<PathBuf> {
        let path = self.timestamped("detail", "csv");

        let mut header = vec!["#".to_string(), "title".to_string(), "url".to_string()];
        header.extend(report.keywords.iter().map(|k| csv_field(k)));
        header.push("total".to_string());

        let mut out = header.join(",");
        out.push('\n');

        for (i, page) in report.pages.iter().enumerate() {
            let mut row = vec![
                (i + 1).to_string(),
                csv_field(&page.title),
                csv_field(&page.url),
            ];
            for keyword in &report.keywords {
                row.push(page.counts.get(keyword).copied().unwrap_or(0).to_string());
            }
            row.push(page.total.to_string());
            out.push_str(&row.join(","));
            out.push('\n');
        }

        let grand_total: usize = report.totals.values().sum();
        let mut totals_row = vec![String::new(), "TOTAL".to_string(), String::new()];
        for keyword in &report.keywords {
            totals_row.push(report.totals.get(keyword).copied().unwrap_or(0).to_string());
        }
        totals_row.push(grand_total.to_string());
        out.push_str(&totals_row.join(","));
        out.push('\n');

        fs::write(&path, out)?;
        Ok(path)
    }

    /// Appends an entry to `history.json`, creating the file on first run
    pub fn append_history(&self, entry: HistoryEntry) -> Result<()> {
        let mut history = self.load_history()?;
        history.push(entry);
        let path = self.output_dir.join(HISTORY_FILE);
        let body = serde_json::to_string_pretty(&history)?;
        fs::write(&path, body)?;
        Ok(())
    }

    /// Loads the run history; a missing or corrupt file yields an empty list
    pub fn load_history(&self) -> Result<Vec<HistoryEntry>> {
        let path = self.output_dir.join(HISTORY_FILE);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let body = fs::read_to_string(&path)?;
        match serde_json::from_str(&body) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                tracing::warn!("discarding unreadable {HISTORY_FILE}: {e}");
                Ok(Vec::new())
            }
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

/// Quotes a CSV field when it contains a delimiter, quote, or newline
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
