use crate::{Document, DocumentIndex};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Filter value meaning "no restriction".
pub const ALL: &str = "All";

/// Scores below this are flagged as low confidence.
pub const LOW_CONFIDENCE_THRESHOLD: f64 = 0.10;

/// Category/subcategory restriction. Both active dimensions must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    category: Option<String>,
    subcategory: Option<String>,
}

impl Filter {
    pub fn new(category: Option<&str>, subcategory: Option<&str>) -> Self {
        Self { category: active(category), subcategory: active(subcategory) }
    }

    pub fn is_unrestricted(&self) -> bool {
        self.category.is_none() && self.subcategory.is_none()
    }

    pub fn matches(&self, doc: &Document) -> bool {
        self.category.as_deref().map_or(true, |c| doc.category == c)
            && self.subcategory.as_deref().map_or(true, |s| doc.subcategory == s)
    }
}

fn active(value: Option<&str>) -> Option<String> {
    value.filter(|v| *v != ALL).map(str::to_string)
}

/// A ranked document with its annotations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(flatten)]
    pub document: Document,
    /// Similarity rounded to 4 decimals.
    pub score: f64,
    /// Unrounded similarity × 100 to one decimal, with a trailing `%`.
    pub match_percentage: String,
    /// Unrounded similarity below 0.10; a `score` of `0.1` can still be flagged.
    pub low_confidence: bool,
}

impl SearchResult {
    pub fn new(document: Document, score: f64) -> Self {
        Self {
            document,
            score: round_to(score, 4),
            match_percentage: format!("{:.1}%", score * 100.0),
            low_confidence: score < LOW_CONFIDENCE_THRESHOLD,
        }
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Keep the documents `filter` admits, order them by score descending with
/// ties going to the smaller document id, and return the first `k`.
///
/// `scores` must be index-aligned with `index`. Zero scores are still ranked;
/// the result only comes back empty when `k` is zero or nothing passes the
/// filter.
pub fn select_top_k(index: &DocumentIndex, scores: &[f64], filter: &Filter, k: usize) -> Vec<SearchResult> {
    debug_assert_eq!(scores.len(), index.len());
    let docs = index.documents();

    let mut candidates: Vec<(usize, f64)> = scores
        .iter()
        .copied()
        .enumerate()
        .filter(|&(pos, _)| filter.matches(&docs[pos]))
        .collect();

    if k == 0 || candidates.is_empty() {
        return Vec::new();
    }

    let rank = |a: &(usize, f64), b: &(usize, f64)| -> Ordering {
        b.1.total_cmp(&a.1)
            .then_with(|| docs[a.0].id.cmp(&docs[b.0].id))
            .then_with(|| a.0.cmp(&b.0))
    };

    let actual_k = k.min(candidates.len());
    if actual_k < candidates.len() {
        candidates.select_nth_unstable_by(actual_k - 1, rank);
        candidates.truncate(actual_k);
    }
    candidates.sort_unstable_by(rank);

    candidates
        .into_iter()
        .map(|(pos, score)| SearchResult::new(docs[pos].clone(), score))
        .collect()
}
