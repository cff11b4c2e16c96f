use crate::corpus::corpus_from_value;
use crate::select::{select_top_k, Filter};
use crate::{Document, DocumentIndex, Result, SearchResult};
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineState {
    /// No fit yet, or the last fit received no documents.
    Empty,
    Indexed,
}

/// Summary of the generation a fit published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub generation: u64,
    pub documents: usize,
    pub terms: usize,
}

/// Owns the live index generation and runs fits and searches against it.
///
/// Searches clone the current `Arc` and score without holding any lock, so
/// they always see one complete generation. A fit builds its generation off
/// to the side and publishes it with a single pointer store.
#[derive(Debug, Default)]
pub struct RankingEngine {
    current: RwLock<Option<Arc<DocumentIndex>>>,
    // serializes fits; holds the last issued generation number
    fit_lock: Mutex<u64>,
}

impl RankingEngine {
    pub fn new() -> Self { Self::default() }

    /// Replace the live generation with one built from `documents`.
    /// An empty collection puts the engine in the `Empty` state.
    pub fn fit(&self, documents: Vec<Document>) -> IndexStats {
        let mut last_generation = self.fit_lock.lock();
        let generation = *last_generation + 1;

        if documents.is_empty() {
            *self.current.write() = None;
            *last_generation = generation;
            tracing::info!(generation, "fit received no documents; engine is empty");
            return IndexStats { generation, documents: 0, terms: 0 };
        }

        let index = DocumentIndex::build(documents, generation);
        let stats = IndexStats { generation, documents: index.len(), terms: index.vocabulary().len() };
        *self.current.write() = Some(Arc::new(index));
        *last_generation = generation;
        tracing::info!(generation, num_docs = stats.documents, num_terms = stats.terms, "published index generation");
        stats
    }

    /// Parse a raw JSON corpus and fit it. A corpus that does not parse is
    /// reported as invalid and the live generation is left untouched.
    pub fn fit_json(&self, corpus: serde_json::Value) -> Result<IndexStats> {
        let documents = corpus_from_value(corpus)?;
        Ok(self.fit(documents))
    }

    /// Rank the live generation against `query`. Never fails: an empty engine,
    /// unrecognized query text or a filter nothing satisfies all degrade to
    /// fewer (possibly zero) results.
    pub fn search(&self, query: &str, top_k: usize, category: Option<&str>, subcategory: Option<&str>) -> Vec<SearchResult> {
        let Some(index) = self.snapshot() else {
            return Vec::new();
        };
        let query_vector = index.encode_query(query);
        let scores = index.scores(&query_vector);
        let filter = Filter::new(category, subcategory);
        let results = select_top_k(&index, &scores, &filter, top_k);
        tracing::debug!(
            generation = index.generation(),
            query_terms = query_vector.nnz(),
            top_k,
            returned = results.len(),
            "search"
        );
        results
    }

    /// The live generation, if any. Holding the returned `Arc` keeps that
    /// generation alive even if a fit replaces it meanwhile.
    pub fn snapshot(&self) -> Option<Arc<DocumentIndex>> {
        self.current.read().clone()
    }

    pub fn state(&self) -> EngineState {
        if self.current.read().is_some() { EngineState::Indexed } else { EngineState::Empty }
    }

    pub fn document_count(&self) -> usize {
        self.current.read().as_ref().map_or(0, |index| index.len())
    }
}
