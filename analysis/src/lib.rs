#![deny(clippy::all, missing_docs, rust_2018_idioms)]
#![warn(clippy::pedantic)]

//! Coverage analysis engine comparing a requirement document (RFP)
//! against a candidate proposal, section by section.

/// Status classification from coverage scores.
pub mod classify;
/// End-to-end comparison pipeline.
pub mod compare;
/// Explicit engine configuration.
pub mod config;
/// Immutable document value types.
pub mod document;
/// Stopword-filtered keyword extraction.
pub mod keywords;
/// Best-matching paragraph search.
pub mod locate;
/// Downstream report block rendering and parsing.
pub mod report;
/// Coverage scoring strategies.
pub mod scoring;
/// Heading-grammar section segmentation.
pub mod segment;
/// Optional structured telemetry.
pub mod telemetry;

pub use classify::{classify, CoverageStatus, Thresholds};
pub use compare::{ComparisonEngine, ComparisonReport, SectionResult};
pub use config::CompareConfig;
pub use document::{title_from_filename, Document};
pub use keywords::KeywordExtractor;
pub use locate::{BestMatchLocator, MatchCandidate};
pub use report::{parse_report_block, render_report_block, ReportParseError, SectionSummary};
pub use scoring::{LexicalScorer, ScoreStrategy, TfIdfSpace};
pub use segment::{Section, SectionSegmenter, SegmentedDocument};
pub use telemetry::{AnalysisTelemetry, AnalysisTelemetryBuilder};
