use serde::{Deserialize, Serialize};

use crate::{
    document::{split_paragraphs, Document},
    keywords::KeywordExtractor,
    scoring::TfIdfSpace,
};

/// Default minimum paragraph length in characters.
pub const DEFAULT_MIN_PARAGRAPH_CHARS: usize = 30;
/// Default similarity floor below which no match is reported.
pub const DEFAULT_MIN_SIMILARITY: f32 = 0.1;

/// The single best-matching passage for a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCandidate {
    /// Winning paragraph, verbatim.
    pub paragraph: String,
    /// Cosine similarity against the query, in [0, 1].
    pub similarity: f32,
}

/// Finds the paragraph of a candidate document most similar to a
/// free-form query, or nothing when no passage is relevant enough.
#[derive(Debug, Clone)]
pub struct BestMatchLocator {
    extractor: KeywordExtractor,
    min_paragraph_chars: usize,
    min_similarity: f32,
}

impl BestMatchLocator {
    /// Creates a locator with explicit cutoffs.
    #[must_use]
    pub fn new(extractor: KeywordExtractor, min_paragraph_chars: usize, min_similarity: f32) -> Self {
        Self {
            extractor,
            min_paragraph_chars,
            min_similarity,
        }
    }

    /// Returns the best-matching paragraph of `document` for `query`.
    ///
    /// `None` is the expected outcome when every paragraph is shorter
    /// than the length cutoff, or when the best cosine similarity is
    /// strictly below the similarity floor. Ties keep the earliest
    /// paragraph in document order.
    #[must_use]
    pub fn find(&self, query: &str, document: &str) -> Option<MatchCandidate> {
        self.best_candidate(query, split_paragraphs(document, self.min_paragraph_chars))
    }

    /// [`BestMatchLocator::find`] over a [`Document`] value, using its
    /// paragraph view.
    #[must_use]
    pub fn find_in(&self, query: &str, document: &Document) -> Option<MatchCandidate> {
        self.best_candidate(query, document.paragraphs(self.min_paragraph_chars))
    }

    fn best_candidate(&self, query: &str, paragraphs: Vec<String>) -> Option<MatchCandidate> {
        if paragraphs.is_empty() {
            return None;
        }
        let space = TfIdfSpace::fit(
            std::iter::once(query).chain(paragraphs.iter().map(String::as_str)),
            &self.extractor,
        );
        let (index, similarity) = space.best_match(0, 1..space.len())?;
        if similarity < self.min_similarity {
            return None;
        }
        Some(MatchCandidate {
            paragraph: paragraphs[index - 1].clone(),
            similarity,
        })
    }
}

impl Default for BestMatchLocator {
    fn default() -> Self {
        Self::new(
            KeywordExtractor::default(),
            DEFAULT_MIN_PARAGRAPH_CHARS,
            DEFAULT_MIN_SIMILARITY,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANDIDATE: &str = "본 제안서는 교통정보 제공 시스템을 중심으로 실시간 데이터 수집과 분석 체계를 구축한다.\n\n예산 집행은 분기별 점검 회의를 통해 투명하게 관리하며 결과를 보고한다.\n\n짧은 단락";

    #[test]
    fn finds_the_relevant_paragraph() {
        let locator = BestMatchLocator::default();
        let best = locator.find("교통정보 제공 시스템", CANDIDATE).unwrap();
        assert!(best.paragraph.contains("교통정보 제공 시스템을 중심으로"));
        assert!(best.similarity > 0.1);
    }

    #[test]
    fn never_returns_a_paragraph_below_the_length_cutoff() {
        let locator = BestMatchLocator::default();
        if let Some(best) = locator.find("짧은 단락", CANDIDATE) {
            assert!(best.paragraph.chars().count() >= DEFAULT_MIN_PARAGRAPH_CHARS);
        }
    }

    #[test]
    fn returns_none_when_no_paragraph_is_long_enough() {
        let locator = BestMatchLocator::default();
        assert!(locator.find("교통정보", "짧다\n\n역시 짧다").is_none());
    }

    #[test]
    fn returns_none_below_the_similarity_floor() {
        let locator = BestMatchLocator::default();
        let unrelated = "완전히 무관한 주제의 식단 구성과 영양 성분 안내 문서입니다 정말로요";
        assert!(locator.find("교통정보 제공 시스템", unrelated).is_none());
    }

    #[test]
    fn document_search_matches_raw_text_search() {
        let locator = BestMatchLocator::default();
        let document = Document::new("제안서", CANDIDATE);
        assert_eq!(
            locator.find_in("교통정보 제공 시스템", &document),
            locator.find("교통정보 제공 시스템", CANDIDATE)
        );
    }

    #[test]
    fn degenerate_query_is_not_found() {
        let locator = BestMatchLocator::default();
        assert!(locator.find("관련 사항", CANDIDATE).is_none());
    }
}
