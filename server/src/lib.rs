use axum::{
    extract::{Query, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    routing::{get, post},
    Json, Router,
};
use rank_core::corpus::load_corpus;
use rank_core::{IndexStats, RankError, RankingEngine, SearchResult};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub const DEFAULT_TOP_N: usize = 8;
pub const DEFAULT_MAX_TOP_N: usize = 100;
const DEFAULT_CORS_ORIGINS: &[&str] = &["http://localhost:5173", "http://127.0.0.1:5173"];

#[derive(Deserialize)]
pub struct SearchQuery {
    #[serde(deserialize_with = "lenient_text")]
    pub query: String,
    #[serde(default)]
    pub top_n: Option<usize>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub subcategory: Option<String>,
}

/// Query text that is not a JSON string (null, numbers, ...) counts as empty.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        _ => String::new(),
    })
}

#[derive(Serialize)]
pub struct RankingResponse {
    pub query: String,
    pub results: Vec<SearchResult>,
}

#[derive(Serialize)]
pub struct CategoryResponse {
    pub categories: Vec<String>,
    pub subcategories: BTreeMap<String, Vec<String>>,
    pub total_documents: usize,
}

#[derive(Deserialize)]
pub struct SubcategoryParams {
    pub category: String,
}

#[derive(Serialize)]
pub struct IndexResponse {
    pub status: &'static str,
    #[serde(flatten)]
    pub stats: IndexStats,
    pub indexed_at: String,
}

/// Process-level settings for the HTTP layer.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub admin_token: Option<String>,
    pub cors_origins: Vec<String>,
    /// Upper bound applied to a request's `top_n`.
    pub max_top_n: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            admin_token: None,
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
            max_top_n: DEFAULT_MAX_TOP_N,
        }
    }
}

impl ServerConfig {
    /// ADMIN_TOKEN enables the reindex route; CORS_ALLOW_ORIGIN (comma-separated)
    /// replaces the default local frontend origins.
    pub fn from_env(max_top_n: usize) -> Self {
        let mut config = Self { max_top_n, ..Self::default() };
        config.admin_token = std::env::var("ADMIN_TOKEN").ok().filter(|t| !t.is_empty());
        if let Ok(val) = std::env::var("CORS_ALLOW_ORIGIN") {
            config.cors_origins = val.split(',').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect();
        }
        config
    }
}

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RankingEngine>,
    pub admin_token: Option<String>,
    pub max_top_n: usize,
}

/// Fit `engine` from the dataset at `path`. A missing or unreadable dataset
/// leaves the engine empty so the server can still come up.
pub fn load_dataset(engine: &RankingEngine, path: &Path) -> Option<IndexStats> {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "data file not found; starting with an empty index");
        return None;
    }
    match load_corpus(path) {
        Ok(docs) => Some(engine.fit(docs)),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to load data; starting with an empty index");
            None
        }
    }
}

pub fn build_app(engine: Arc<RankingEngine>, config: &ServerConfig) -> Router {
    let state = AppState { engine, admin_token: config.admin_token.clone(), max_top_n: config.max_top_n };

    let api = Router::new()
        .route("/search", post(search_handler))
        .route("/dataset-size", get(dataset_size_handler))
        .route("/categories", get(categories_handler))
        .route("/subcategories", get(subcategories_handler))
        .route("/health", get(api_health_handler))
        .route("/index", post(index_handler));

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(|| async { Json(serde_json::json!({ "status": "ok" })) }))
        .nest("/api", api)
        .with_state(state)
        .layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return base.allow_origin(Any);
    }
    let origins: Vec<HeaderValue> = origins.iter().filter_map(|s| s.parse().ok()).collect();
    base.allow_origin(AllowOrigin::list(origins))
}

async fn root_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Welcome to the ranking API",
        "health": "/health",
        "search": "/api/search",
    }))
}

pub async fn search_handler(State(state): State<AppState>, Json(params): Json<SearchQuery>) -> Json<RankingResponse> {
    let top_n = params.top_n.unwrap_or(DEFAULT_TOP_N).min(state.max_top_n);
    let results = state.engine.search(&params.query, top_n, params.category.as_deref(), params.subcategory.as_deref());
    Json(RankingResponse { query: params.query, results })
}

async fn dataset_size_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "total_documents": state.engine.document_count() }))
}

async fn categories_handler(State(state): State<AppState>) -> Json<CategoryResponse> {
    let response = match state.engine.snapshot() {
        Some(index) => CategoryResponse {
            categories: index.categories(),
            subcategories: index.catalog(),
            total_documents: index.len(),
        },
        None => CategoryResponse { categories: vec![], subcategories: BTreeMap::new(), total_documents: 0 },
    };
    Json(response)
}

async fn subcategories_handler(State(state): State<AppState>, Query(params): Query<SubcategoryParams>) -> Json<serde_json::Value> {
    let subcategories = state.engine.snapshot().map(|index| index.subcategories(&params.category)).unwrap_or_default();
    Json(serde_json::json!({ "subcategories": subcategories }))
}

async fn api_health_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok", "document_count": state.engine.document_count() }))
}

// --- Admin: full rebuild from a posted corpus ---
async fn index_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(corpus): Json<serde_json::Value>,
) -> Result<Json<IndexResponse>, (StatusCode, String)> {
    authorize(&state, &headers)?;
    let engine = Arc::clone(&state.engine);
    let stats = tokio::task::spawn_blocking(move || engine.fit_json(corpus))
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .map_err(|e| match e {
            RankError::InvalidCorpus { .. } => (StatusCode::BAD_REQUEST, e.to_string()),
            other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
        })?;
    let indexed_at = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "".into());
    Ok(Json(IndexResponse { status: "indexed", stats, indexed_at }))
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), (StatusCode, String)> {
    let required = match &state.admin_token {
        Some(t) => t,
        None => return Err((StatusCode::UNAUTHORIZED, "ADMIN_TOKEN not set".into())),
    };
    let provided = headers.get("X-ADMIN-TOKEN").and_then(|v| v.to_str().ok()).unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, "invalid admin token".into()))
    }
}
