use crate::document::split_documents;
use crate::engine::{SearchEngine, SearchResult};
use crate::index::IndexStats;
use crate::normalizer::Normalizer;
use axum::{
    extract::{Form, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared, read-only state. Every request builds its own index.
#[derive(Clone)]
pub struct AppState {
    pub normalizer: Arc<Normalizer>,
}

impl AppState {
    pub fn new(normalizer: Normalizer) -> Self {
        Self {
            normalizer: Arc::new(normalizer),
        }
    }
}

// ========== Request/Response Types ==========

/// Form submitted by the search page. Absent fields are rejected before the
/// index is built.
#[derive(Debug, Deserialize)]
pub struct SearchForm {
    pub documents: Option<String>,
    pub query: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NormalizeRequest {
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    /// Normalized document texts, indexed by document ID
    pub documents: Vec<String>,
    pub results: SearchResult,
    pub stats: IndexStats,
}

#[derive(Debug, Serialize)]
pub struct NormalizeResponse {
    pub text: String,
    pub terms: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }
}

impl ApiResponse<()> {
    fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message),
        }
    }
}

// ========== Error Handling ==========

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("missing form field '{0}'")]
    MissingField(&'static str),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingField(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        tracing::warn!("rejected request: {}", message);

        (self.status(), Json(ApiResponse::<()>::error(message))).into_response()
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ApiError> {
    value.ok_or(ApiError::MissingField(field))
}

// ========== Handlers ==========

async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::success("OK"))
}

async fn search_documents(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Result<impl IntoResponse, ApiError> {
    let submission = required(form.documents, "documents")?;
    let query = required(form.query, "query")?;

    let documents = split_documents(&submission);
    let engine = SearchEngine::build(&state.normalizer, &documents);
    let results = engine.search(&query);
    let stats = engine.index().stats();

    tracing::info!(
        documents = documents.len(),
        matched = results.len(),
        "answered search"
    );

    let response = SearchResponse {
        query,
        documents: engine.into_texts(),
        results,
        stats,
    };

    Ok(Json(ApiResponse::success(response)))
}

async fn normalize_text(
    State(state): State<AppState>,
    Query(req): Query<NormalizeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let text = required(req.text, "text")?;
    let terms = state.normalizer.normalize(&text);

    Ok(Json(ApiResponse::success(NormalizeResponse { text, terms })))
}

// ========== Router ==========

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/search", post(search_documents))
        .route("/normalize", get(normalize_text))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
