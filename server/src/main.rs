use anyhow::Result;
use axum::Router;
use clap::Parser;
use rank_core::RankingEngine;
use server::{build_app, load_dataset, ServerConfig, DEFAULT_MAX_TOP_N};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Catalog to index at startup (JSON, JSON Lines, or a directory of them)
    #[arg(long, default_value = "./data/sample_dataset.json")]
    data: PathBuf,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8000)]
    port: u16,
    /// Largest top_n a search request may ask for
    #[arg(long, default_value_t = DEFAULT_MAX_TOP_N)]
    max_top_n: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let engine = Arc::new(RankingEngine::new());
    load_dataset(&engine, &args.data);
    let config = ServerConfig::from_env(args.max_top_n);
    let app: Router = build_app(engine, &config);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
