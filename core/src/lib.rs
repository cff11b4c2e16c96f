use serde::{Deserialize, Serialize};

pub mod corpus;
pub mod engine;
pub mod error;
pub mod index;
pub mod select;
pub mod tokenizer;
pub mod vector;
pub mod vocabulary;

pub use engine::{EngineState, IndexStats, RankingEngine};
pub use error::{RankError, Result};
pub use index::DocumentIndex;
pub use select::{Filter, SearchResult, ALL};
pub use vector::SparseVector;
pub use vocabulary::Vocabulary;

pub type TermId = u32;
pub type DocId = i64;

/// A catalog entry as it arrives from the data layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub title: String,
    pub category: String,
    pub subcategory: String,
    pub description: String,
    pub tags: Vec<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub difficulty_level: Option<String>,
    #[serde(default)]
    pub price_range: Option<String>,
}

impl Document {
    /// The single text field a document is indexed under: title, category,
    /// subcategory, description, tags and brand, space-joined. Absent fields
    /// contribute nothing.
    pub fn composite_text(&self) -> String {
        let mut parts: Vec<&str> = vec![&self.title, &self.category, &self.subcategory, &self.description];
        parts.extend(self.tags.iter().map(String::as_str));
        if let Some(brand) = &self.brand {
            parts.push(brand);
        }
        parts.join(" ")
    }
}
