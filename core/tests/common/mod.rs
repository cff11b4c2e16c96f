#![allow(dead_code)]

use rank_core::Document;

pub fn doc(id: i64, title: &str, category: &str, subcategory: &str, description: &str, tags: &[&str]) -> Document {
    Document {
        id,
        title: title.into(),
        category: category.into(),
        subcategory: subcategory.into(),
        description: description.into(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        brand: None,
        difficulty_level: None,
        price_range: None,
    }
}

/// The two-document catalog used throughout the scenario tests.
pub fn python_and_espresso() -> Vec<Document> {
    vec![
        doc(1, "Python Basics", "Technical", "Languages", "intro to python", &["python"]),
        doc(2, "Espresso Machine", "Product", "Appliances", "brews coffee", &["coffee"]),
    ]
}

pub fn small_catalog() -> Vec<Document> {
    let mut docs = vec![
        doc(1, "Python Essentials", "Technical", "Programming Languages", "Comprehensive guide to mastering Python.", &["python", "tutorial"]),
        doc(2, "Rust Fundamentals", "Technical", "Programming Languages", "Ownership, borrowing and lifetimes.", &["rust", "reference"]),
        doc(3, "Redis Best Practices", "Technical", "Databases", "Caching patterns with Redis.", &["redis", "caching"]),
        doc(4, "PostgreSQL Performance Pack", "Technical", "Databases", "Indexes and query plans.", &["postgresql", "manual"]),
        doc(5, "Docker Advanced Patterns", "Technical", "Cloud & DevOps", "Containers in production.", &["docker", "containers"]),
        doc(6, "Sony Wireless Bluetooth Headphones Pro", "Product", "Electronics", "High-quality headphones with noise cancellation.", &["headphones", "sony"]),
        doc(7, "Ninja Air Fryers Max", "Product", "Home Appliances", "Compact air fryer with smart connectivity.", &["air-fryers", "ninja"]),
        doc(8, "Keurig Coffee Makers Plus", "Product", "Home Appliances", "Brews coffee fast.", &["coffee-makers", "keurig"]),
    ];
    docs[5].brand = Some("Sony".into());
    docs[5].price_range = Some("Premium".into());
    docs[6].brand = Some("Ninja".into());
    docs[7].brand = Some("Keurig".into());
    docs[0].difficulty_level = Some("Beginner".into());
    docs
}
