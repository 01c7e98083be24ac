use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{classify::CoverageStatus, compare::ComparisonReport};

/// Separator used by the downstream feedback collaborator.
const ARROW: char = '→';

/// One parsed line of a report block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSummary {
    /// Section label, without surrounding brackets.
    pub label: String,
    /// Parsed coverage status.
    pub status: CoverageStatus,
}

/// Errors raised while parsing a report block.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportParseError {
    /// A non-blank line carries no `→` separator.
    #[error("line {line_number} has no '→' separator: {line:?}")]
    MissingArrow {
        /// 1-based line number.
        line_number: usize,
        /// Offending line.
        line: String,
    },
    /// The status side of a line is not a known label.
    #[error("line {line_number} has unknown status {label:?}")]
    UnknownStatus {
        /// 1-based line number.
        line_number: usize,
        /// Offending status text.
        label: String,
    },
}

/// Renders the flattened `"[section] → status"` block consumed by the
/// feedback-generation collaborator, one line per section in order.
#[must_use]
pub fn render_report_block(report: &ComparisonReport) -> String {
    report
        .results
        .iter()
        .map(|result| format!("[{}] {ARROW} {}", result.label, result.status.label()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parses a report block back into per-section summaries.
///
/// Blank lines are skipped; brackets around the label are optional.
pub fn parse_report_block(block: &str) -> Result<Vec<SectionSummary>, ReportParseError> {
    let mut summaries = Vec::new();
    for (offset, raw_line) in block.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        let line_number = offset + 1;
        let Some((label_part, status_part)) = line.split_once(ARROW) else {
            return Err(ReportParseError::MissingArrow {
                line_number,
                line: line.to_string(),
            });
        };
        let label = label_part
            .trim()
            .trim_start_matches('[')
            .trim_end_matches(']')
            .trim()
            .to_string();
        let status_text = status_part.trim();
        let Some(status) = CoverageStatus::from_label(status_text) else {
            return Err(ReportParseError::UnknownStatus {
                line_number,
                label: status_text.to_string(),
            });
        };
        summaries.push(SectionSummary { label, status });
    }
    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ScoreStrategy;
    use chrono::Utc;
    use uuid::Uuid;

    fn report() -> ComparisonReport {
        ComparisonReport {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            strategy: ScoreStrategy::LexicalOverlap,
            results: vec![
                crate::compare::SectionResult {
                    label: "3.1 보안 기술 명시".into(),
                    score: 0.8,
                    keyword_count: 3,
                    status: CoverageStatus::Full,
                },
                crate::compare::SectionResult {
                    label: "3.2 데이터 수집 방법".into(),
                    score: 0.2,
                    keyword_count: 4,
                    status: CoverageStatus::Missing,
                },
            ],
        }
    }

    #[test]
    fn render_and_parse_round_trip() {
        let block = render_report_block(&report());
        assert_eq!(
            block,
            "[3.1 보안 기술 명시] → FULL\n[3.2 데이터 수집 방법] → MISSING"
        );
        let summaries = parse_report_block(&block).unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].label, "3.1 보안 기술 명시");
        assert_eq!(summaries[1].status, CoverageStatus::Missing);
    }

    #[test]
    fn parse_skips_blank_lines() {
        let summaries = parse_report_block("\n[3.1 보안] → FULL\n\n").unwrap();
        assert_eq!(summaries.len(), 1);
    }

    #[test]
    fn missing_arrow_is_reported_with_line_number() {
        let err = parse_report_block("[3.1 보안] FULL").unwrap_err();
        assert_eq!(
            err,
            ReportParseError::MissingArrow {
                line_number: 1,
                line: "[3.1 보안] FULL".into(),
            }
        );
    }

    #[test]
    fn unknown_status_is_rejected() {
        let err = parse_report_block("[3.1 보안] → 포함됨").unwrap_err();
        assert!(matches!(err, ReportParseError::UnknownStatus { .. }));
    }
}
