//! Offline keyword analysis over crawled page text
//!
//! Two passes are available: [`KeywordAnalyzer`] discovers the vocabulary
//! most related to a query keyword, and [`analyze_details`] counts a
//! fixed keyword list page by page.

#[allow(clippy::module_inception)]
mod analyzer;
mod detail;
mod stopwords;
mod tokenizer;

pub use analyzer::{
    AnalysisIndex, KeywordAnalyzer, KeywordReport, KeywordScore, DEFAULT_TOP_N, DEFAULT_WEIGHT,
};
pub use detail::{analyze_details, DetailReport, PageKeywordCounts};
pub use tokenizer::{ScriptTokenizer, Tokenize, DEFAULT_MIN_TOKEN_LEN};
