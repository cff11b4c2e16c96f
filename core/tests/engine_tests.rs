mod common;

use common::{doc, python_and_espresso, small_catalog};
use rank_core::{EngineState, RankingEngine};
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn python_query_ranks_matching_document_first() {
    let engine = RankingEngine::new();
    engine.fit(python_and_espresso());

    let results = engine.search("python", 10, None, None);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].document.id, 1);
    assert!(results[0].score > 0.0);
    assert_eq!(results[1].document.id, 2);
    assert_eq!(results[1].score, 0.0);
    assert_eq!(results[1].match_percentage, "0.0%");
    assert!(results[1].low_confidence);
}

#[test]
fn search_before_fit_is_empty() {
    let engine = RankingEngine::new();
    assert!(engine.search("python", 10, None, None).is_empty());
    assert!(engine.search("", 10, Some("All"), Some("All")).is_empty());
}

#[test]
fn empty_fit_returns_to_empty_state() {
    let engine = RankingEngine::new();
    engine.fit(small_catalog());
    engine.fit(Vec::new());
    assert_eq!(engine.state(), EngineState::Empty);
    assert!(engine.search("python", 10, None, None).is_empty());
}

#[test]
fn empty_query_ranks_everything_by_id() {
    let engine = RankingEngine::new();
    engine.fit(small_catalog());
    let results = engine.search("", 100, None, None);
    assert_eq!(results.iter().map(|r| r.document.id).collect::<Vec<_>>(), (1..=8).collect::<Vec<_>>());
    assert!(results.iter().all(|r| r.score == 0.0 && r.low_confidence));
}

#[test]
fn unknown_terms_are_ignored() {
    let engine = RankingEngine::new();
    engine.fit(small_catalog());
    let with_noise = engine.search("redis zzzunknownzzz", 3, None, None);
    let plain = engine.search("redis", 3, None, None);
    assert_eq!(with_noise, plain);
    assert_eq!(plain[0].document.id, 3);
}

#[test]
fn category_and_subcategory_filters() {
    let engine = RankingEngine::new();
    engine.fit(small_catalog());

    let products = engine.search("coffee", 10, Some("Product"), None);
    assert_eq!(products.len(), 3);
    assert!(products.iter().all(|r| r.document.category == "Product"));
    assert_eq!(products[0].document.id, 8);

    let appliances = engine.search("coffee", 10, Some("Product"), Some("Home Appliances"));
    assert_eq!(appliances.iter().map(|r| r.document.id).collect::<Vec<_>>(), vec![8, 7]);

    assert!(engine.search("coffee", 10, Some("Technical"), Some("Home Appliances")).is_empty());
    assert!(engine.search("coffee", 10, Some("Nope"), None).is_empty());
}

#[test]
fn all_sentinel_matches_omitted_filter() {
    let engine = RankingEngine::new();
    engine.fit(small_catalog());
    assert_eq!(engine.search("caching", 5, Some("All"), Some("All")), engine.search("caching", 5, None, None));
    assert_eq!(
        engine.search("caching", 5, Some("Technical"), Some("All")),
        engine.search("caching", 5, Some("Technical"), None)
    );
}

#[test]
fn top_k_is_honored_exactly() {
    let engine = RankingEngine::new();
    engine.fit(small_catalog());
    assert_eq!(engine.search("python", 3, None, None).len(), 3);
    assert_eq!(engine.search("python", 0, None, None).len(), 0);
    assert_eq!(engine.search("python", 50, None, None).len(), 8);
    assert_eq!(engine.search("python", 50, Some("Technical"), Some("Databases")).len(), 2);
}

#[test]
fn refit_replaces_old_corpus() {
    let engine = RankingEngine::new();
    engine.fit(python_and_espresso());
    assert!(engine.search("espresso", 1, None, None)[0].score > 0.0);

    engine.fit(vec![
        doc(10, "Go Concurrency", "Technical", "Languages", "goroutines and channels", &["go"]),
        doc(11, "Tea Kettle", "Product", "Appliances", "boils water", &["tea"]),
    ]);
    let results = engine.search("espresso", 10, None, None);
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.score == 0.0));
    assert!(results.iter().all(|r| !r.document.title.contains("Espresso")));
}

#[test]
fn brand_is_indexed() {
    let engine = RankingEngine::new();
    let mut docs = python_and_espresso();
    docs[1].brand = Some("Breville".into());
    engine.fit(docs);
    let results = engine.search("breville", 1, None, None);
    assert_eq!(results[0].document.id, 2);
    assert!(!results[0].low_confidence);
}

#[test]
fn concurrent_searches_see_whole_generations() {
    let engine = Arc::new(RankingEngine::new());
    engine.fit(python_and_espresso());
    let start = Arc::new(Barrier::new(5));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            let start = Arc::clone(&start);
            thread::spawn(move || {
                start.wait();
                for _ in 0..200 {
                    let results = engine.search("python coffee", 10, None, None);
                    // either generation has exactly two documents
                    assert_eq!(results.len(), 2);
                    let ids: Vec<i64> = results.iter().map(|r| r.document.id).collect();
                    assert!(ids.iter().all(|id| *id <= 2) || ids.iter().all(|id| *id >= 20));
                }
            })
        })
        .collect();

    start.wait();
    for round in 0..50 {
        if round % 2 == 0 {
            engine.fit(vec![
                doc(20, "Python Cookbook", "Technical", "Languages", "recipes", &["python"]),
                doc(21, "Coffee Grinder", "Product", "Appliances", "burr grinder", &["coffee"]),
            ]);
        } else {
            engine.fit(python_and_espresso());
        }
    }

    for r in readers {
        r.join().unwrap();
    }
}
