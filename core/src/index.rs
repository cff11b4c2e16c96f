use crate::tokenizer::tokenize;
use crate::vector::cosine_similarity;
use crate::{Document, SparseVector, Vocabulary, ALL};
use std::collections::{BTreeMap, BTreeSet};

/// One immutable generation: the documents in ingestion order, the vector of
/// each (position-aligned), and the vocabulary they were encoded with.
#[derive(Debug)]
pub struct DocumentIndex {
    generation: u64,
    vocabulary: Vocabulary,
    documents: Vec<Document>,
    vectors: Vec<SparseVector>,
}

impl DocumentIndex {
    pub fn build(documents: Vec<Document>, generation: u64) -> Self {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenize(&d.composite_text())).collect();
        let vocabulary = Vocabulary::fit(&tokenized);
        let vectors = tokenized.iter().map(|tokens| SparseVector::encode(tokens, &vocabulary)).collect();
        Self { generation, vocabulary, documents, vectors }
    }

    pub fn generation(&self) -> u64 { self.generation }

    pub fn vocabulary(&self) -> &Vocabulary { &self.vocabulary }

    pub fn documents(&self) -> &[Document] { &self.documents }

    pub fn vectors(&self) -> &[SparseVector] { &self.vectors }

    pub fn len(&self) -> usize { self.documents.len() }

    pub fn is_empty(&self) -> bool { self.documents.is_empty() }

    /// Encode query text with this generation's vocabulary.
    pub fn encode_query(&self, text: &str) -> SparseVector {
        SparseVector::encode(&tokenize(text), &self.vocabulary)
    }

    /// Cosine similarity of `query` against every document, index-aligned.
    pub fn scores(&self, query: &SparseVector) -> Vec<f64> {
        self.vectors.iter().map(|v| cosine_similarity(query, v)).collect()
    }

    /// Distinct categories, sorted.
    pub fn categories(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self.documents.iter().map(|d| d.category.as_str()).collect();
        set.into_iter().map(str::to_string).collect()
    }

    /// Distinct subcategories of `category`, sorted. `"All"` spans every category.
    pub fn subcategories(&self, category: &str) -> Vec<String> {
        let set: BTreeSet<&str> = self
            .documents
            .iter()
            .filter(|d| category == ALL || d.category == category)
            .map(|d| d.subcategory.as_str())
            .collect();
        set.into_iter().map(str::to_string).collect()
    }

    /// Category → sorted subcategories.
    pub fn catalog(&self) -> BTreeMap<String, Vec<String>> {
        let mut map: BTreeMap<String, BTreeSet<&str>> = BTreeMap::new();
        for doc in &self.documents {
            map.entry(doc.category.clone()).or_default().insert(doc.subcategory.as_str());
        }
        map.into_iter()
            .map(|(cat, subs)| (cat, subs.into_iter().map(str::to_string).collect()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: i64, category: &str, subcategory: &str, text: &str) -> Document {
        Document {
            id,
            title: text.into(),
            category: category.into(),
            subcategory: subcategory.into(),
            description: String::new(),
            tags: vec![],
            brand: None,
            difficulty_level: None,
            price_range: None,
        }
    }

    fn sample() -> DocumentIndex {
        DocumentIndex::build(
            vec![
                doc(1, "Technical", "Databases", "redis cache"),
                doc(2, "Product", "Books", "rust book"),
                doc(3, "Technical", "Cloud", "docker"),
                doc(4, "Technical", "Databases", "postgres"),
            ],
            1,
        )
    }

    #[test]
    fn vectors_align_with_documents() {
        let index = sample();
        assert_eq!(index.len(), 4);
        assert_eq!(index.vectors().len(), 4);
        let q = index.encode_query("docker");
        let scores = index.scores(&q);
        assert_eq!(scores.len(), 4);
        assert!(scores[2] > 0.0);
        assert_eq!(scores[0], 0.0);
    }

    #[test]
    fn category_listings_are_sorted_and_distinct() {
        let index = sample();
        assert_eq!(index.categories(), vec!["Product", "Technical"]);
        assert_eq!(index.subcategories("Technical"), vec!["Cloud", "Databases"]);
        assert_eq!(index.subcategories("All"), vec!["Books", "Cloud", "Databases"]);
        assert!(index.subcategories("Missing").is_empty());
        let catalog = index.catalog();
        assert_eq!(catalog["Product"], vec!["Books"]);
        assert_eq!(catalog["Technical"], vec!["Cloud", "Databases"]);
    }

    #[test]
    fn documents_without_terms_get_zero_vectors() {
        let index = DocumentIndex::build(vec![doc(1, "", "", "the of and")], 1);
        assert!(index.vocabulary().is_empty());
        assert!(index.vectors()[0].is_zero());
        assert_eq!(index.scores(&index.encode_query("anything")), vec![0.0]);
    }
}
