use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rank_core::corpus::load_corpus;
use rank_core::{RankingEngine, SearchResult};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "rankctl")]
#[command(about = "Rank a document catalog against free-text queries", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Index a catalog and print the ranked results for one query
    Search {
        /// Catalog path (JSON/JSONL file or directory)
        #[arg(long)]
        data: PathBuf,
        /// Query text
        #[arg(long, default_value = "")]
        query: String,
        /// Number of results to return
        #[arg(long, default_value_t = 8)]
        top_n: usize,
        /// Restrict to a category ("All" for no restriction)
        #[arg(long)]
        category: Option<String>,
        /// Restrict to a subcategory ("All" for no restriction)
        #[arg(long)]
        subcategory: Option<String>,
    },
    /// Index a catalog and print its size, vocabulary and categories
    Stats {
        /// Catalog path (JSON/JSONL file or directory)
        #[arg(long)]
        data: PathBuf,
    },
}

#[derive(Serialize)]
struct SearchOutput<'a> {
    query: &'a str,
    results: Vec<SearchResult>,
}

#[derive(Serialize)]
struct StatsOutput {
    total_documents: usize,
    vocabulary_size: usize,
    categories: BTreeMap<String, Vec<String>>,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Search { data, query, top_n, category, subcategory } => {
            let engine = fit(&data)?;
            let results = engine.search(&query, top_n, category.as_deref(), subcategory.as_deref());
            print_json(&SearchOutput { query: &query, results })
        }
        Commands::Stats { data } => {
            let engine = fit(&data)?;
            let output = match engine.snapshot() {
                Some(index) => StatsOutput {
                    total_documents: index.len(),
                    vocabulary_size: index.vocabulary().len(),
                    categories: index.catalog(),
                },
                None => StatsOutput { total_documents: 0, vocabulary_size: 0, categories: BTreeMap::new() },
            };
            print_json(&output)
        }
    }
}

fn fit(data: &Path) -> Result<RankingEngine> {
    let docs = load_corpus(data).with_context(|| format!("loading catalog from {}", data.display()))?;
    let engine = RankingEngine::new();
    let stats = engine.fit(docs);
    tracing::info!(num_docs = stats.documents, num_terms = stats.terms, "catalog indexed");
    Ok(engine)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
