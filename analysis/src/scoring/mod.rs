//! Coverage scoring strategies.
//!
//! Both scorers share the contract `score(query, corpus) -> [0, 1]`
//! and are pure: deterministic for identical inputs and identical
//! stopword configuration.

/// Keyword-containment scoring.
pub mod lexical;
/// Strategy selection.
pub mod strategy;
/// TF-IDF vector space and cosine similarity.
pub mod vector;

pub use lexical::LexicalScorer;
pub use strategy::ScoreStrategy;
pub use vector::TfIdfSpace;
