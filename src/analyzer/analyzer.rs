//! Keyword relevance scoring: TF-IDF blended with query co-occurrence
//!
//! The analyzer is an offline pass over a collection of extracted
//! document texts. It tokenizes once into an [`AnalysisIndex`]; ranking
//! at a different blend weight reuses the index without re-tokenizing.

use crate::analyzer::tokenizer::{ScriptTokenizer, Tokenize, DEFAULT_MIN_TOKEN_LEN};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Default number of ranked keywords reported
pub const DEFAULT_TOP_N: usize = 30;

/// Default blend weight: 70% TF-IDF, 30% co-occurrence
pub const DEFAULT_WEIGHT: f64 = 0.7;

/// One ranked token and its scores
#[derive(Debug, Clone, Serialize)]
pub struct KeywordScore {
    pub keyword: String,
    /// Total occurrences across all documents
    pub frequency: u64,
    /// Number of documents containing both this token and the query
    pub co_occurrence: u64,
    pub tfidf_score: f64,
    pub norm_tfidf: f64,
    pub norm_cooc: f64,
    pub combined_score: f64,
}

/// Result of one analysis run, consumed read-only by presentation layers
#[derive(Debug, Clone, Serialize)]
pub struct KeywordReport {
    pub query_keyword: String,
    pub total_pages_analyzed: usize,
    pub pages_containing_query: usize,
    pub related_keywords: Vec<KeywordScore>,
}

/// Token statistics built once per document collection
///
/// Holds everything ranking needs, so the blend weight can change and the
/// ranking be recomputed without touching the raw text again.
pub struct AnalysisIndex {
    query: String,
    total_documents: usize,
    pages_containing_query: usize,
    tf: HashMap<String, u64>,
    cooc: HashMap<String, u64>,
    tfidf: HashMap<String, f64>,
}

impl AnalysisIndex {
    /// Tokenizes the documents and accumulates all term statistics
    ///
    /// The query token is excluded from its own TF-IDF and co-occurrence
    /// scores.
    pub fn build(tokenizer: &dyn Tokenize, documents: &[String], query: &str) -> Self {
        let query = query.to_lowercase();
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenizer.tokenize(d)).collect();

        let mut pages_containing_query = 0;
        let mut df: HashMap<String, u64> = HashMap::new();
        let mut tf: HashMap<String, u64> = HashMap::new();
        let mut cooc: HashMap<String, u64> = HashMap::new();

        for tokens in &tokenized {
            let unique: HashSet<&String> = tokens.iter().collect();
            let has_query = unique.contains(&query);
            if has_query {
                pages_containing_query += 1;
            }

            for token in &unique {
                *df.entry((*token).clone()).or_default() += 1;
                if has_query && **token != query {
                    *cooc.entry((*token).clone()).or_default() += 1;
                }
            }
            for token in tokens {
                *tf.entry(token.clone()).or_default() += 1;
            }
        }

        // Smoothed IDF: positive and finite even when df = N or df = 0
        let n_docs = tokenized.len();
        let mut tfidf: HashMap<String, f64> = HashMap::new();
        for (token, &tf_val) in &tf {
            if *token == query {
                continue;
            }
            let df_val = df.get(token).copied().unwrap_or(0);
            let idf = ((n_docs as f64 + 1.0) / (df_val as f64 + 1.0)).ln() + 1.0;
            tfidf.insert(token.clone(), tf_val as f64 * idf);
        }

        Self {
            query,
            total_documents: n_docs,
            pages_containing_query,
            tf,
            cooc,
            tfidf,
        }
    }

    pub fn total_documents(&self) -> usize {
        self.total_documents
    }

    pub fn pages_containing_query(&self) -> usize {
        self.pages_containing_query
    }

    /// Ranks tokens by blended score at the given weight
    ///
    /// `combined = weight * norm_tfidf + (1 - weight) * norm_cooc`, both
    /// sides max-normalized (1.0 stands in for an absent maximum, so an
    /// empty side never divides by zero). Descending by combined score;
    /// equal scores break by token text ascending. The tie order is a
    /// deliberate deterministic choice, not an artifact of map iteration.
    pub fn rank(&self, weight: f64, top_n: usize) -> Vec<KeywordScore> {
        let max_tfidf = self
            .tfidf
            .values()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        let max_tfidf = if max_tfidf > 0.0 { max_tfidf } else { 1.0 };

        let max_cooc = self.cooc.values().copied().max().unwrap_or(0);
        let max_cooc = if max_cooc > 0 { max_cooc as f64 } else { 1.0 };

        let all_tokens: HashSet<&String> = self.tfidf.keys().chain(self.cooc.keys()).collect();

        let mut scored: Vec<KeywordScore> = all_tokens
            .into_iter()
            .map(|token| {
                let tfidf = self.tfidf.get(token).copied().unwrap_or(0.0);
                let cooc = self.cooc.get(token).copied().unwrap_or(0);
                let norm_tfidf = tfidf / max_tfidf;
                let norm_cooc = cooc as f64 / max_cooc;
                KeywordScore {
                    keyword: token.clone(),
                    frequency: self.tf.get(token).copied().unwrap_or(0),
                    co_occurrence: cooc,
                    tfidf_score: tfidf,
                    norm_tfidf,
                    norm_cooc,
                    combined_score: weight * norm_tfidf + (1.0 - weight) * norm_cooc,
                }
            })
            .collect();

        scored.sort_by(|a, b| {
            b.combined_score
                .partial_cmp(&a.combined_score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.keyword.cmp(&b.keyword))
        });
        scored.truncate(top_n);
        scored
    }
}

/// Ranks vocabulary by relevance to a query keyword
pub struct KeywordAnalyzer {
    tokenizer: Box<dyn Tokenize>,
    top_n: usize,
    weight: f64,
}

impl KeywordAnalyzer {
    /// Creates an analyzer with the default tokenizer and parameters
    pub fn new() -> Self {
        Self {
            tokenizer: Box::new(ScriptTokenizer::new(DEFAULT_MIN_TOKEN_LEN)),
            top_n: DEFAULT_TOP_N,
            weight: DEFAULT_WEIGHT,
        }
    }

    /// Replaces the tokenizer backend
    pub fn with_tokenizer(mut self, tokenizer: Box<dyn Tokenize>) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// Sets how many ranked keywords the report contains
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Sets the TF-IDF share of the blended score, clamped to [0, 1]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight.clamp(0.0, 1.0);
        self
    }

    /// Builds the reusable index for a document collection
    pub fn index(&self, documents: &[String], query: &str) -> AnalysisIndex {
        AnalysisIndex::build(self.tokenizer.as_ref(), documents, query)
    }

    /// Runs the full analysis and returns a ranked report
    ///
    /// An empty document collection yields a report with zero counts and
    /// no ranked tokens, not an error.
    pub fn analyze(&self, documents: &[String], query: &str) -> KeywordReport {
        let index = self.index(documents, query);
        KeywordReport {
            query_keyword: query.to_string(),
            total_pages_analyzed: index.total_documents(),
            pages_containing_query: index.pages_containing_query(),
            related_keywords: index.rank(self.weight, self.top_n),
        }
    }
}

impl Default for KeywordAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn find<'a>(report: &'a KeywordReport, keyword: &str) -> Option<&'a KeywordScore> {
        report.related_keywords.iter().find(|k| k.keyword == keyword)
    }

    #[test]
    fn test_korean_scenario() {
        let analyzer = KeywordAnalyzer::new();
        let report = analyzer.analyze(&docs(&["한국 경제 성장", "한국 주식 시장"]), "한국");

        assert_eq!(report.total_pages_analyzed, 2);
        assert_eq!(report.pages_containing_query, 2);
        assert!(find(&report, "한국").is_none(), "query excluded from ranking");

        let economy = find(&report, "경제").expect("경제 present");
        assert_eq!(economy.co_occurrence, 1);
        let stock = find(&report, "주식").expect("주식 present");
        assert_eq!(stock.co_occurrence, 1);
    }

    #[test]
    fn test_empty_collection() {
        let analyzer = KeywordAnalyzer::new();
        let report = analyzer.analyze(&[], "anything");

        assert_eq!(report.total_pages_analyzed, 0);
        assert_eq!(report.pages_containing_query, 0);
        assert!(report.related_keywords.is_empty());
    }

    #[test]
    fn test_query_absent_from_all_documents() {
        let analyzer = KeywordAnalyzer::new();
        let report = analyzer.analyze(&docs(&["alpha beta", "beta gamma"]), "delta");

        assert_eq!(report.pages_containing_query, 0);
        // No co-occurrence anywhere, but TF-IDF ranking still works
        assert!(report.related_keywords.iter().all(|k| k.co_occurrence == 0));
        assert!(find(&report, "beta").is_some());
    }

    #[test]
    fn test_tfidf_smoothing_positive_when_df_equals_n() {
        // "common" appears in every document; smoothed IDF keeps it positive
        let analyzer = KeywordAnalyzer::new();
        let report = analyzer.analyze(&docs(&["common alpha", "common beta"]), "alpha");
        let common = find(&report, "common").unwrap();
        assert!(common.tfidf_score > 0.0);
        assert!(common.tfidf_score.is_finite());
    }

    #[test]
    fn test_tfidf_monotone_in_frequency() {
        let tokenizer = ScriptTokenizer::default();

        // Same document frequency for "signal" (1 doc), higher raw frequency
        let low = AnalysisIndex::build(
            &tokenizer,
            &docs(&["signal noise", "noise filler"]),
            "noise",
        );
        let high = AnalysisIndex::build(
            &tokenizer,
            &docs(&["signal signal signal noise", "noise filler"]),
            "noise",
        );

        let low_score = low.tfidf.get("signal").copied().unwrap();
        let high_score = high.tfidf.get("signal").copied().unwrap();
        assert!(high_score > low_score);
    }

    #[test]
    fn test_weight_boundaries() {
        let analyzer = KeywordAnalyzer::new();
        let documents = docs(&["한국 경제 경제 성장", "한국 주식", "경제 혼자"]);
        let index = analyzer.index(&documents, "한국");

        for score in index.rank(1.0, 100) {
            assert!(
                (score.combined_score - score.norm_tfidf).abs() < 1e-12,
                "weight 1.0 must equal norm_tfidf for {}",
                score.keyword
            );
        }
        for score in index.rank(0.0, 100) {
            assert!(
                (score.combined_score - score.norm_cooc).abs() < 1e-12,
                "weight 0.0 must equal norm_cooc for {}",
                score.keyword
            );
        }
    }

    #[test]
    fn test_reweighting_reuses_index() {
        let analyzer = KeywordAnalyzer::new();
        let documents = docs(&["한국 경제 성장", "한국 주식 시장"]);
        let index = analyzer.index(&documents, "한국");

        let heavy_tfidf = index.rank(1.0, 10);
        let heavy_cooc = index.rank(0.0, 10);

        // Same token set either way, scores differ by weight only
        let a: HashSet<_> = heavy_tfidf.iter().map(|k| k.keyword.clone()).collect();
        let b: HashSet<_> = heavy_cooc.iter().map(|k| k.keyword.clone()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_ties_break_by_token_text() {
        let analyzer = KeywordAnalyzer::new();
        // "zulu" and "alpha" are symmetric: same tf, same df, same cooc
        let report = analyzer.analyze(&docs(&["zulu alpha query"]), "query");

        let keywords: Vec<_> = report
            .related_keywords
            .iter()
            .map(|k| k.keyword.as_str())
            .collect();
        assert_eq!(keywords, vec!["alpha", "zulu"]);
    }

    #[test]
    fn test_top_n_bounds_output() {
        let analyzer = KeywordAnalyzer::new().with_top_n(3);
        let report = analyzer.analyze(
            &docs(&["alpha beta gamma delta epsilon zeta query"]),
            "query",
        );
        assert_eq!(report.related_keywords.len(), 3);
    }

    #[test]
    fn test_weight_clamped() {
        let analyzer = KeywordAnalyzer::new().with_weight(7.0);
        let report = analyzer.analyze(&docs(&["alpha query"]), "query");
        for score in &report.related_keywords {
            assert!((score.combined_score - score.norm_tfidf).abs() < 1e-12);
        }
    }

    #[test]
    fn test_frequency_counts_all_occurrences() {
        let analyzer = KeywordAnalyzer::new();
        let report = analyzer.analyze(&docs(&["economy economy query", "economy filler"]), "query");
        let economy = find(&report, "economy").unwrap();
        assert_eq!(economy.frequency, 3);
        assert_eq!(economy.co_occurrence, 1);
    }
}
