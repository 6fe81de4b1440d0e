use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::AppResult;
use crate::middleware::RequestId;
use crate::models::{BookRecord, RecommendationInput, RecommendationResponse};
use crate::services::{book_search, recommendations, CatalogInfo};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct BookSummary {
    pub id: usize,
    pub title: String,
    pub author: String,
}

impl From<(usize, &BookRecord)> for BookSummary {
    fn from((id, book): (usize, &BookRecord)) -> Self {
        Self {
            id,
            title: book.title.clone(),
            author: book.author.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookDetailResponse {
    pub id: usize,
    #[serde(flatten)]
    pub book: BookRecord,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Rank the catalog against the submitted seed books and quiz answers
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(input): Json<RecommendationInput>,
) -> AppResult<Json<RecommendationResponse>> {
    tracing::info!(
        request_id = %request_id,
        seed_count = input.seed_books.len(),
        "Processing recommendation request"
    );

    let top_n = state.config.resolve_top_n(input.top_n);
    let response = recommendations::get_recommendations(&state.catalog, input, top_n).await?;

    tracing::info!(
        request_id = %request_id,
        count = response.recommendations.len(),
        "Recommendation request completed"
    );

    Ok(Json(response))
}

/// Title autocomplete for the seed book picker
pub async fn search_books(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Json<Vec<BookSummary>> {
    let limit = params
        .limit
        .unwrap_or(book_search::DEFAULT_SUGGESTION_LIMIT)
        .min(state.config.max_top_n);
    let catalog = state.catalog.snapshot().await;

    let results: Vec<BookSummary> = book_search::search_titles(catalog.books(), &params.q, limit)
        .into_iter()
        .map(BookSummary::from)
        .collect();

    Json(results)
}

/// Full record for one book
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<usize>,
) -> AppResult<Json<BookDetailResponse>> {
    let catalog = state.catalog.snapshot().await;
    let book = catalog.get(id)?.clone();
    Ok(Json(BookDetailResponse { id, book }))
}

/// Version and size of the current catalog
pub async fn catalog_info(State(state): State<AppState>) -> Json<CatalogInfo> {
    Json(state.catalog.snapshot().await.info())
}

/// Re-read the configured source and swap the catalog
pub async fn reload_catalog(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> AppResult<Json<CatalogInfo>> {
    tracing::info!(
        request_id = %request_id,
        source = %state.source.describe(),
        "Reloading catalog"
    );

    let catalog = state.catalog.reload_from(state.source.as_ref()).await?;
    Ok(Json(catalog.info()))
}
