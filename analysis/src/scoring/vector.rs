use std::collections::{HashMap, HashSet};

use crate::keywords::KeywordExtractor;

/// TF-IDF vector space over one comparison call's candidate set.
///
/// Term statistics must reflect the whole candidate set, so the space
/// is fitted once per comparison over every document involved (all
/// section queries plus all counterpart units), then queried pairwise.
/// Vectors are L2-normalized at fit time; cosine similarity reduces to
/// a sparse dot product. Degenerate documents (no surviving keywords)
/// get an empty vector and score 0.0 against everything.
#[derive(Debug, Clone)]
pub struct TfIdfSpace {
    vectors: Vec<HashMap<String, f32>>,
}

impl TfIdfSpace {
    /// Fits the space over `documents` in order. Document indices in
    /// later similarity queries refer to this order.
    #[must_use]
    pub fn fit<'a, I>(documents: I, extractor: &KeywordExtractor) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let token_docs: Vec<Vec<String>> = documents
            .into_iter()
            .map(|doc| extractor.extract(doc))
            .collect();
        let total_docs = token_docs.len() as f32;

        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for tokens in &token_docs {
            let unique: HashSet<&str> = tokens.iter().map(String::as_str).collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        let vectors = token_docs
            .iter()
            .map(|tokens| {
                let mut weights: HashMap<String, f32> = HashMap::new();
                for term in tokens {
                    *weights.entry(term.clone()).or_insert(0.0) += 1.0;
                }
                let mut norm_sq = 0.0_f32;
                for (term, weight) in &mut weights {
                    let df = doc_freq[term.as_str()] as f32;
                    // Smoothed idf, sklearn-style: ln((1+n)/(1+df)) + 1.
                    let idf = ((1.0 + total_docs) / (1.0 + df)).ln() + 1.0;
                    *weight *= idf;
                    norm_sq += *weight * *weight;
                }
                let norm = norm_sq.sqrt();
                if norm > 0.0 {
                    for weight in weights.values_mut() {
                        *weight /= norm;
                    }
                }
                weights
            })
            .collect();
        Self { vectors }
    }

    /// Number of fitted documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// True when the space holds no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Cosine similarity between two fitted documents, in [0, 1].
    /// Out-of-range indices and all-zero vectors score 0.0.
    #[must_use]
    pub fn similarity(&self, a: usize, b: usize) -> f32 {
        let (Some(va), Some(vb)) = (self.vectors.get(a), self.vectors.get(b)) else {
            return 0.0;
        };
        let (small, large) = if va.len() <= vb.len() {
            (va, vb)
        } else {
            (vb, va)
        };
        let dot: f32 = small
            .iter()
            .filter_map(|(term, weight)| large.get(term).map(|other| weight * other))
            .sum();
        dot.clamp(0.0, 1.0)
    }

    /// Argmax of `similarity(query, candidate)` over `candidates`.
    /// Ties keep the earliest candidate. `None` when `candidates` is
    /// empty.
    #[must_use]
    pub fn best_match<I>(&self, query: usize, candidates: I) -> Option<(usize, f32)>
    where
        I: IntoIterator<Item = usize>,
    {
        let mut best: Option<(usize, f32)> = None;
        for candidate in candidates {
            let score = self.similarity(query, candidate);
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((candidate, score)),
            }
        }
        best
    }
}
