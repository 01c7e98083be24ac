use crate::keywords::KeywordExtractor;

/// Lexical-overlap scorer: the fraction of the query's keywords that
/// occur as substrings anywhere in the lower-cased corpus.
///
/// Keywords are a frequency-weighted multiset, so a term the query
/// repeats counts once per occurrence. An empty keyword set scores 0.
#[derive(Debug, Clone, Default)]
pub struct LexicalScorer {
    extractor: KeywordExtractor,
}

impl LexicalScorer {
    /// Creates a scorer around the given keyword configuration.
    #[must_use]
    pub fn new(extractor: KeywordExtractor) -> Self {
        Self { extractor }
    }

    /// Scores `query` against `corpus`.
    #[must_use]
    pub fn score(&self, query: &str, corpus: &str) -> f32 {
        let keywords = self.extractor.extract(query);
        self.score_keywords(&keywords, &corpus.to_lowercase())
    }

    /// Scores pre-extracted keywords against an already lower-cased
    /// corpus; lets the pipeline lowercase the counterpart once.
    #[must_use]
    pub fn score_keywords(&self, keywords: &[String], corpus_lower: &str) -> f32 {
        if keywords.is_empty() {
            return 0.0;
        }
        let matches = keywords
            .iter()
            .filter(|keyword| corpus_lower.contains(keyword.as_str()))
            .count();
        matches as f32 / keywords.len() as f32
    }

    /// The keyword configuration in use.
    #[must_use]
    pub fn extractor(&self) -> &KeywordExtractor {
        &self.extractor
    }
}
