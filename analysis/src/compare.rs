use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use serde_json::json;
use shared_audit::AuditLevel;
use uuid::Uuid;

use crate::{
    classify::{classify, CoverageStatus, Thresholds},
    config::CompareConfig,
    document::split_paragraphs,
    keywords::KeywordExtractor,
    scoring::{LexicalScorer, ScoreStrategy, TfIdfSpace},
    segment::{Section, SectionSegmenter},
    telemetry::AnalysisTelemetry,
};

/// Coverage verdict for one requirement section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionResult {
    /// Section label (`"<number> <title>"`).
    pub label: String,
    /// Coverage score in [0, 1].
    pub score: f32,
    /// Number of keywords extracted from the section span.
    pub keyword_count: usize,
    /// Discrete coverage status.
    pub status: CoverageStatus,
}

/// Ordered comparison output, mirroring section order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// Report id, also used as the telemetry correlation id.
    pub id: Uuid,
    /// UTC creation time.
    pub generated_at: DateTime<Utc>,
    /// Strategy that produced the scores.
    pub strategy: ScoreStrategy,
    /// One verdict per section, in heading order.
    pub results: Vec<SectionResult>,
}

impl ComparisonReport {
    /// Number of sections with the given status.
    #[must_use]
    pub fn count(&self, status: CoverageStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }
}

/// Compares a requirement document against a counterpart, section by
/// section: segment, extract keywords, score, classify.
#[derive(Debug, Clone)]
pub struct ComparisonEngine {
    config: CompareConfig,
    segmenter: SectionSegmenter,
    extractor: KeywordExtractor,
    telemetry: Option<AnalysisTelemetry>,
}

impl ComparisonEngine {
    /// Creates an engine from a validated configuration.
    pub fn new(config: CompareConfig) -> Result<Self> {
        config.validate()?;
        let segmenter = config.segmenter();
        let extractor = config.extractor();
        Ok(Self {
            config,
            segmenter,
            extractor,
            telemetry: None,
        })
    }

    /// Attaches a telemetry handle.
    #[must_use]
    pub fn with_telemetry(mut self, telemetry: AnalysisTelemetry) -> Self {
        self.telemetry = Some(telemetry);
        self
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &CompareConfig {
        &self.config
    }

    /// Runs the full synchronous comparison.
    ///
    /// A requirement with zero recognized headings produces a report
    /// with an empty result list, not an error.
    #[must_use]
    pub fn compare(&self, requirement: &str, counterpart: &str) -> ComparisonReport {
        let sections = self.segmenter.segment(requirement);
        let results = match self.config.strategy {
            ScoreStrategy::LexicalOverlap => {
                let corpus_lower = counterpart.to_lowercase();
                let scorer = LexicalScorer::new(self.extractor.clone());
                sections
                    .sections()
                    .iter()
                    .map(|section| self.lexical_result(&scorer, section, &corpus_lower))
                    .collect()
            }
            ScoreStrategy::VectorSimilarity => {
                let prepared = self.prepare_vector_scoring(sections.sections(), counterpart);
                sections
                    .sections()
                    .iter()
                    .enumerate()
                    .map(|(index, section)| prepared.result(index, section, self.config.thresholds))
                    .collect()
            }
        };
        self.finish_report(results)
    }

    /// Concurrent variant: one blocking task per section over shared
    /// read-only inputs, joined back in original section order.
    pub async fn compare_concurrent(
        &self,
        requirement: &str,
        counterpart: &str,
    ) -> Result<ComparisonReport> {
        let sections: Vec<Section> = self.segmenter.segment(requirement).sections().to_vec();
        self.log_event("compare.batch_start", json!({ "sections": sections.len() }));
        let thresholds = self.config.thresholds;

        let mut tasks = Vec::with_capacity(sections.len());
        match self.config.strategy {
            ScoreStrategy::LexicalOverlap => {
                let corpus_lower = Arc::new(counterpart.to_lowercase());
                let scorer = Arc::new(LexicalScorer::new(self.extractor.clone()));
                for section in sections {
                    let corpus_lower = Arc::clone(&corpus_lower);
                    let scorer = Arc::clone(&scorer);
                    tasks.push(tokio::task::spawn_blocking(move || {
                        let keywords = scorer.extractor().extract(&section.full_text());
                        let score = scorer.score_keywords(&keywords, &corpus_lower);
                        SectionResult {
                            label: section.label(),
                            score,
                            keyword_count: keywords.len(),
                            status: classify(score, thresholds),
                        }
                    }));
                }
            }
            ScoreStrategy::VectorSimilarity => {
                let prepared = Arc::new(self.prepare_vector_scoring(&sections, counterpart));
                for (index, section) in sections.into_iter().enumerate() {
                    let prepared = Arc::clone(&prepared);
                    tasks.push(tokio::task::spawn_blocking(move || {
                        prepared.result(index, &section, thresholds)
                    }));
                }
            }
        }

        let results = try_join_all(tasks).await?;
        Ok(self.finish_report(results))
    }

    fn lexical_result(
        &self,
        scorer: &LexicalScorer,
        section: &Section,
        corpus_lower: &str,
    ) -> SectionResult {
        let keywords = self.extractor.extract(&section.full_text());
        let score = scorer.score_keywords(&keywords, corpus_lower);
        SectionResult {
            label: section.label(),
            score,
            keyword_count: keywords.len(),
            status: classify(score, self.config.thresholds),
        }
    }

    /// Fits the TF-IDF space once over the full candidate set: every
    /// section query followed by every counterpart paragraph.
    fn prepare_vector_scoring(&self, sections: &[Section], counterpart: &str) -> VectorScoring {
        let queries: Vec<String> = sections.iter().map(Section::full_text).collect();
        let units = split_paragraphs(counterpart, self.config.min_paragraph_chars);
        let space = TfIdfSpace::fit(
            queries
                .iter()
                .map(String::as_str)
                .chain(units.iter().map(String::as_str)),
            &self.extractor,
        );
        VectorScoring {
            space,
            extractor: self.extractor.clone(),
            query_count: queries.len(),
            unit_count: units.len(),
        }
    }

    fn finish_report(&self, results: Vec<SectionResult>) -> ComparisonReport {
        let report = ComparisonReport {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            strategy: self.config.strategy,
            results,
        };
        self.log_event(
            "compare.completed",
            json!({
                "report_id": report.id,
                "strategy": report.strategy.label(),
                "sections": report.results.len(),
                "full": report.count(CoverageStatus::Full),
                "partial": report.count(CoverageStatus::Partial),
                "missing": report.count(CoverageStatus::Missing),
            }),
        );
        report
    }

    fn log_event(&self, action: &str, details: serde_json::Value) {
        if let Some(telemetry) = &self.telemetry {
            let _ = telemetry.log(AuditLevel::Info, action, details);
        }
    }
}

/// Shared read-only state for vector scoring of one comparison call.
#[derive(Debug)]
struct VectorScoring {
    space: TfIdfSpace,
    extractor: KeywordExtractor,
    query_count: usize,
    unit_count: usize,
}

impl VectorScoring {
    fn result(&self, index: usize, section: &Section, thresholds: Thresholds) -> SectionResult {
        let keywords = self.extractor.extract(&section.full_text());
        let score = self
            .space
            .best_match(index, self.query_count..self.query_count + self.unit_count)
            .map_or(0.0, |(_, similarity)| similarity);
        SectionResult {
            label: section.label(),
            score,
            keyword_count: keywords.len(),
            status: classify(score, thresholds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;

    static LEXICAL_ENGINE: Lazy<ComparisonEngine> =
        Lazy::new(|| engine(ScoreStrategy::LexicalOverlap));

    const REQUIREMENT: &str = "3.1 보안 기술 명시\n보안 일정 측정\n3.2 데이터 수집 방법\n데이터 수집 절차를 기술한다\n3.3 유지보수 방안\n유지보수 조직과 절차";

    const PROPOSAL: &str = "본 제안서는 일정과 측정 체계를 포함한다.\n\n데이터 수집 절차를 상세히 기술하며 수집 도구를 명시한다.";

    fn engine(strategy: ScoreStrategy) -> ComparisonEngine {
        ComparisonEngine::new(CompareConfig {
            strategy,
            ..CompareConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn lexical_comparison_mirrors_section_order() {
        let report = LEXICAL_ENGINE.compare(REQUIREMENT, PROPOSAL);
        assert_eq!(report.results.len(), 3);
        assert_eq!(report.results[0].label, "3.1 보안 기술 명시");
        assert_eq!(report.results[1].label, "3.2 데이터 수집 방법");
        assert_eq!(report.results[2].label, "3.3 유지보수 방안");
    }

    #[test]
    fn partially_covered_section_is_partial() {
        // 3.1's span yields keywords [보안, 기술, 명시, 보안, 일정, 측정];
        // the proposal contains 일정, 측정, 기술 (in "기술하며") and 명시
        // (in "명시한다") but neither 보안 occurrence, so 4 of 6 match.
        let report = LEXICAL_ENGINE.compare(REQUIREMENT, PROPOSAL);
        let first = &report.results[0];
        assert!((first.score - 4.0 / 6.0).abs() < 1e-6);
        assert_eq!(first.status, CoverageStatus::Partial);
        assert_eq!(first.keyword_count, 6);
    }

    #[test]
    fn uncovered_section_is_missing() {
        let report = LEXICAL_ENGINE.compare(REQUIREMENT, PROPOSAL);
        assert_eq!(report.results[2].status, CoverageStatus::Missing);
    }

    #[test]
    fn zero_headings_produce_an_empty_report() {
        let report = LEXICAL_ENGINE.compare("항목 없는 본문", PROPOSAL);
        assert!(report.results.is_empty());
    }

    #[test]
    fn vector_strategy_scores_paragraph_correspondence() {
        let config = CompareConfig {
            strategy: ScoreStrategy::VectorSimilarity,
            min_paragraph_chars: 10,
            ..CompareConfig::default()
        };
        let report = ComparisonEngine::new(config)
            .unwrap()
            .compare(REQUIREMENT, PROPOSAL);
        assert_eq!(report.results.len(), 3);
        // 3.2 maps almost verbatim onto the second proposal paragraph.
        assert!(report.results[1].score > report.results[2].score);
    }

    #[test]
    fn vector_strategy_with_no_units_scores_zero() {
        let config = CompareConfig {
            strategy: ScoreStrategy::VectorSimilarity,
            ..CompareConfig::default()
        };
        let report = ComparisonEngine::new(config)
            .unwrap()
            .compare(REQUIREMENT, "짧음");
        assert!(report.results.iter().all(|r| r.score == 0.0));
        assert!(report
            .results
            .iter()
            .all(|r| r.status == CoverageStatus::Missing));
    }

    #[tokio::test]
    async fn concurrent_comparison_matches_the_synchronous_result() {
        let sync = LEXICAL_ENGINE.compare(REQUIREMENT, PROPOSAL);
        let concurrent = LEXICAL_ENGINE
            .compare_concurrent(REQUIREMENT, PROPOSAL)
            .await
            .unwrap();
        assert_eq!(sync.results, concurrent.results);
    }

    #[test]
    fn invalid_configuration_is_rejected() {
        let config = CompareConfig {
            thresholds: Thresholds::new(0.2, 0.8),
            ..CompareConfig::default()
        };
        assert!(ComparisonEngine::new(config).is_err());
    }
}
