use crate::{TermId, Vocabulary};
use std::cmp::Ordering;
use std::collections::HashMap;

/// L2-normalized TF-IDF weights, sorted by term id. Only nonzero weights are
/// stored; a vector with no entries is the zero vector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(TermId, f64)>,
}

impl SparseVector {
    /// Encode a token sequence against a fitted vocabulary.
    ///
    /// Raw term counts are weighted by IDF and scaled to unit length. Tokens
    /// the vocabulary does not know are dropped, so text made only of unseen
    /// terms encodes to the zero vector.
    pub fn encode<S: AsRef<str>>(tokens: &[S], vocabulary: &Vocabulary) -> Self {
        let mut tf_raw: HashMap<TermId, u32> = HashMap::new();
        for token in tokens {
            if let Some(tid) = vocabulary.term_id(token.as_ref()) {
                *tf_raw.entry(tid).or_insert(0) += 1;
            }
        }

        let mut entries: Vec<(TermId, f64)> = tf_raw
            .into_iter()
            .map(|(tid, tf)| (tid, tf as f64 * vocabulary.idf(tid)))
            .collect();
        entries.sort_unstable_by_key(|&(tid, _)| tid);

        let norm = entries.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt();
        if norm == 0.0 {
            return Self::default();
        }
        for (_, w) in entries.iter_mut() {
            *w /= norm;
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[(TermId, f64)] {
        &self.entries
    }

    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt()
    }

    pub fn weight(&self, tid: TermId) -> f64 {
        self.entries
            .binary_search_by_key(&tid, |&(t, _)| t)
            .map(|i| self.entries[i].1)
            .unwrap_or(0.0)
    }

    /// Dot product by merge join over the sorted term ids.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (a, b) = (&self.entries, &other.entries);
        let mut sum = 0.0;
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                Ordering::Equal => {
                    sum += a[i].1 * b[j].1;
                    i += 1;
                    j += 1;
                }
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
            }
        }
        sum
    }
}

/// Cosine of the angle between two unit vectors; 0.0 if either is zero.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    if a.is_zero() || b.is_zero() {
        return 0.0;
    }
    a.dot(b)
}
