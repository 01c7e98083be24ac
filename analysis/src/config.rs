use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{
    classify::Thresholds,
    keywords::KeywordExtractor,
    locate::{BestMatchLocator, DEFAULT_MIN_PARAGRAPH_CHARS, DEFAULT_MIN_SIMILARITY},
    scoring::ScoreStrategy,
    segment::{SectionSegmenter, DEFAULT_MIN_HEADING_CHARS},
};

/// Complete, explicit engine configuration.
///
/// Every tunable of the pipeline lives here and is passed by value
/// into the engine; nothing is read from ambient process state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// Scoring strategy for section coverage.
    pub strategy: ScoreStrategy,
    /// Classification thresholds.
    pub thresholds: Thresholds,
    /// Stopword override; `None` keeps the built-in contract fillers.
    pub stopwords: Option<Vec<String>>,
    /// Minimum heading length accepted by the segmenter.
    pub min_heading_chars: usize,
    /// Minimum paragraph length for vector units and the locator.
    pub min_paragraph_chars: usize,
    /// Similarity floor for the best-match locator.
    pub min_similarity: f32,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            strategy: ScoreStrategy::default(),
            thresholds: Thresholds::default(),
            stopwords: None,
            min_heading_chars: DEFAULT_MIN_HEADING_CHARS,
            min_paragraph_chars: DEFAULT_MIN_PARAGRAPH_CHARS,
            min_similarity: DEFAULT_MIN_SIMILARITY,
        }
    }
}

impl CompareConfig {
    /// Loads and validates a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_json::from_str(&data)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates configuration invariants.
    pub fn validate(&self) -> Result<()> {
        self.thresholds.validate()?;
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.min_similarity),
            "min_similarity must be within [0, 1], got {}",
            self.min_similarity
        );
        anyhow::ensure!(
            self.min_heading_chars >= 1,
            "min_heading_chars must be at least 1"
        );
        Ok(())
    }

    /// Builds the keyword extractor for this configuration.
    #[must_use]
    pub fn extractor(&self) -> KeywordExtractor {
        match &self.stopwords {
            Some(stopwords) => KeywordExtractor::new(stopwords.iter().cloned()),
            None => KeywordExtractor::default(),
        }
    }

    /// Builds the section segmenter for this configuration.
    #[must_use]
    pub fn segmenter(&self) -> SectionSegmenter {
        SectionSegmenter::new(self.min_heading_chars)
    }

    /// Builds the best-match locator for this configuration.
    #[must_use]
    pub fn locator(&self) -> BestMatchLocator {
        BestMatchLocator::new(
            self.extractor(),
            self.min_paragraph_chars,
            self.min_similarity,
        )
    }
}
