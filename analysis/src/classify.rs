use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Discrete coverage state for one requirement section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CoverageStatus {
    /// The counterpart addresses the section adequately.
    Full,
    /// The counterpart addresses the section only in part.
    Partial,
    /// The counterpart does not address the section.
    Missing,
}

impl CoverageStatus {
    /// Human-readable label used in the downstream report block.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Full => "FULL",
            Self::Partial => "PARTIAL",
            Self::Missing => "MISSING",
        }
    }

    /// Parses a label produced by [`CoverageStatus::label`].
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "FULL" => Some(Self::Full),
            "PARTIAL" => Some(Self::Partial),
            "MISSING" => Some(Self::Missing),
            _ => None,
        }
    }
}

/// Classification thresholds. Always explicit configuration; the
/// `Default` pair (0.75, 0.4) is a convenience, not a hidden contract.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Lower bound (inclusive) of the FULL band.
    pub full: f32,
    /// Lower bound (inclusive) of the PARTIAL band.
    pub partial: f32,
}

impl Thresholds {
    /// Creates a threshold pair.
    #[must_use]
    pub fn new(full: f32, partial: f32) -> Self {
        Self { full, partial }
    }

    /// Validates `0 <= partial <= full <= 1`.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.partial)
                && (0.0..=1.0).contains(&self.full)
                && self.partial <= self.full,
            "invalid thresholds: partial={} full={}",
            self.partial,
            self.full
        );
        Ok(())
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            full: 0.75,
            partial: 0.4,
        }
    }
}

/// Maps a coverage score onto a discrete status. Band edges are
/// inclusive on the lower side: a score equal to a threshold belongs
/// to the higher band.
#[must_use]
pub fn classify(score: f32, thresholds: Thresholds) -> CoverageStatus {
    if score >= thresholds.full {
        CoverageStatus::Full
    } else if score >= thresholds.partial {
        CoverageStatus::Partial
    } else {
        CoverageStatus::Missing
    }
}
