use serde::{Deserialize, Serialize};

/// Supported coverage scoring strategies.
///
/// Lexical overlap only measures literal keyword containment; vector
/// similarity is the right choice when the counterpart splits into
/// meaningful units (paragraphs) that can correspond to a section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreStrategy {
    /// Keyword containment ratio against the raw counterpart text.
    #[default]
    LexicalOverlap,
    /// Best TF-IDF cosine similarity against counterpart paragraphs.
    VectorSimilarity,
}

impl ScoreStrategy {
    /// Returns a human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::LexicalOverlap => "lexical-overlap",
            Self::VectorSimilarity => "vector-similarity",
        }
    }
}
