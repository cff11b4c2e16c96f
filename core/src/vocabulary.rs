use crate::TermId;
use std::collections::{HashMap, HashSet};

/// Term dictionary and smoothed IDF weights for one index generation.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    dictionary: HashMap<String, TermId>,
    df: Vec<u32>,
    idf: Vec<f64>,
    num_docs: usize,
}

impl Vocabulary {
    /// Build the vocabulary from tokenized documents.
    ///
    /// Term ids are dense and assigned in first-seen order, so the same corpus
    /// always produces the same ids. For a corpus of `N` documents the weight
    /// of a term seen in `df` of them is `ln((1 + N) / (1 + df)) + 1`, which is
    /// strictly positive for every term in the dictionary.
    pub fn fit(documents: &[Vec<String>]) -> Self {
        let mut dictionary: HashMap<String, TermId> = HashMap::new();
        let mut df: Vec<u32> = Vec::new();

        for tokens in documents {
            let mut seen_in_doc: HashSet<TermId> = HashSet::new();
            for term in tokens {
                let tid = match dictionary.get(term) {
                    Some(&tid) => tid,
                    None => {
                        let tid = df.len() as TermId;
                        dictionary.insert(term.clone(), tid);
                        df.push(0);
                        tid
                    }
                };
                if seen_in_doc.insert(tid) {
                    df[tid as usize] += 1;
                }
            }
        }

        let n = documents.len() as f64;
        let idf = df
            .iter()
            .map(|&df_t| ((1.0 + n) / (1.0 + df_t as f64)).ln() + 1.0)
            .collect();

        Self { dictionary, df, idf, num_docs: documents.len() }
    }

    pub fn term_id(&self, term: &str) -> Option<TermId> {
        self.dictionary.get(term).copied()
    }

    /// Panics if `tid` was not issued by this vocabulary.
    pub fn idf(&self, tid: TermId) -> f64 {
        self.idf[tid as usize]
    }

    pub fn document_frequency(&self, tid: TermId) -> u32 {
        self.df[tid as usize]
    }

    /// Number of documents the vocabulary was fitted on.
    pub fn num_docs(&self) -> usize {
        self.num_docs
    }

    pub fn len(&self) -> usize {
        self.df.len()
    }

    pub fn is_empty(&self) -> bool {
        self.df.is_empty()
    }
}
