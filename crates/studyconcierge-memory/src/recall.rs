//! Keyword-overlap search configuration and scoring.

use std::collections::BTreeSet;

/// Options applied after scoring a search.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchOptions {
    /// Maximum number of hits to return.
    pub limit: Option<usize>,
    /// Optional minimum score filter (hits must still score above zero).
    pub min_score: Option<f32>,
}

impl SearchOptions {
    /// Options returning at most `limit` hits.
    pub fn top_k(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            min_score: None,
        }
    }
}

/// Split text into lower-cased alphanumeric tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|ch: char| !ch.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Fraction of query tokens that also appear in `text`.
///
/// Returns 0.0 for an empty query set.
pub fn overlap_score(query: &BTreeSet<String>, text: &str) -> f32 {
    if query.is_empty() {
        return 0.0;
    }
    let tokens: BTreeSet<String> = tokenize(text).into_iter().collect();
    let shared = query.intersection(&tokens).count();
    shared as f32 / query.len() as f32
}
