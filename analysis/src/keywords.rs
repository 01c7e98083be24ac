use std::collections::HashSet;

use regex::Regex;

/// Default stopword list: contract filler terms that appear in nearly
/// every RFP section and carry no discriminating weight.
pub const DEFAULT_STOPWORDS: &[&str] = &["관련", "사항", "필요", "위한", "대한"];

const TOKEN_PATTERN: &str = r"[0-9A-Za-z\p{Hangul}\p{Han}\p{Hiragana}\p{Katakana}]+";
const SMART_QUOTES: &[char] = &['\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}'];

/// Extracts normalized candidate terms from a text span.
///
/// Terms are lower-cased runs of CJK or Latin alphanumeric characters,
/// at least two characters long, with the configured stopwords removed.
/// Deterministic for a fixed stopword configuration; no I/O.
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    token: Regex,
    stopwords: HashSet<String>,
}

impl KeywordExtractor {
    /// Creates an extractor with a caller-supplied stopword list.
    #[must_use]
    pub fn new<I, S>(stopwords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            token: Regex::new(TOKEN_PATTERN).expect("valid token pattern"),
            stopwords: stopwords
                .into_iter()
                .map(|s| s.into().to_lowercase())
                .collect(),
        }
    }

    /// Extracts keywords as a frequency-weighted multiset: a term that
    /// occurs twice in the span appears twice in the result.
    #[must_use]
    pub fn extract(&self, text: &str) -> Vec<String> {
        let normalized: String = text
            .to_lowercase()
            .chars()
            .filter(|c| !SMART_QUOTES.contains(c))
            .collect();
        self.token
            .find_iter(&normalized)
            .map(|m| m.as_str().to_string())
            .filter(|token| token.chars().count() >= 2)
            .filter(|token| !self.stopwords.contains(token))
            .collect()
    }

    /// Extracts the deduplicated keyword set for set-based consumers.
    #[must_use]
    pub fn extract_unique(&self, text: &str) -> HashSet<String> {
        self.extract(text).into_iter().collect()
    }

    /// Returns the configured stopwords.
    #[must_use]
    pub fn stopwords(&self) -> &HashSet<String> {
        &self.stopwords
    }
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_STOPWORDS.iter().copied())
    }
}
