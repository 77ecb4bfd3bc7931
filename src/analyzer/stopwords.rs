//! Fixed English and Korean stopword sets
//!
//! High-frequency, low-information vocabulary excluded from analysis:
//! English function words, and for Korean a mix of particles, connective
//! adverbs, auxiliary verb forms, and reporting verbs common in news text.

pub const STOPWORDS_EN: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does",
    "did", "will", "would", "could", "should", "may", "might", "shall", "can", "need", "must",
    "not", "no", "nor", "so", "if", "then", "than", "too", "very", "just", "about", "above",
    "after", "again", "all", "also", "am", "any", "as", "because", "before", "between", "both",
    "each", "few", "get", "got", "he", "her", "here", "him", "his", "how", "i", "into", "it",
    "its", "let", "me", "more", "most", "my", "new", "now", "old", "only", "other", "our", "out",
    "own", "part", "per", "put", "re", "s", "same", "she", "some", "still", "such", "t", "take",
    "that", "their", "them", "there", "these", "they", "this", "those", "through", "under", "up",
    "us", "use", "want", "we", "what", "when", "where", "which", "while", "who", "whom", "why",
    "you", "your",
];

pub const STOPWORDS_KO: &[&str] = &[
    // Pronouns, determiners, bound nouns
    "이", "그", "저", "것", "수", "등", "들", "및", "에", "의", "가", "를", "은", "는", "로",
    "와", "과", "도", "에서", "으로",
    // Verb and adjective stems
    "하다", "있다", "되다", "없다", "않다", "이다", "하는", "했다", "한다", "된다", "되는",
    "되었다", "하게", "하며", "하면", "하여", "하고",
    // Reporting verbs
    "밝혔다", "전했다", "말했다", "보도했다", "발표했다", "알려졌다", "나타났다", "지적했다",
    "강조했다", "설명했다", "주장했다", "제기했다", "보였다", "드러났다", "알렸다", "내놓았다",
    "가졌다", "열렸다",
    // Adverbs and conjunctions
    "대한", "또는", "때문", "위해", "통해", "따라", "관련", "대해", "이후", "이번", "현재",
    "최근", "지난", "올해", "내년", "오늘", "그러나", "하지만", "그리고", "또한", "다만",
    "이에", "한편",
    // Residual particles and endings
    "에게", "부터", "까지", "마다", "라고", "라며", "이라고", "라는", "라면", "으며", "이며",
    "에도", "에는", "에서는", "으로는",
    // Generic high-frequency vocabulary
    "경우", "정도", "이상", "이하", "가운데", "가능", "중심", "예정", "모두", "매우", "가장",
    "특히", "약", "총", "각", "전체",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_duplicates_within_sets() {
        let mut en: Vec<_> = STOPWORDS_EN.to_vec();
        en.sort_unstable();
        en.dedup();
        assert_eq!(en.len(), STOPWORDS_EN.len());

        let mut ko: Vec<_> = STOPWORDS_KO.to_vec();
        ko.sort_unstable();
        ko.dedup();
        assert_eq!(ko.len(), STOPWORDS_KO.len());
    }

    #[test]
    fn test_english_set_is_lowercase() {
        assert!(STOPWORDS_EN.iter().all(|w| w.chars().all(|c| c.is_ascii_lowercase())));
    }
}
