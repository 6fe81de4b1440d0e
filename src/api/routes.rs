use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api", api_routes())
        // The request id layer runs first so the trace span can read it
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// API routes under /api
fn api_routes() -> Router<AppState> {
    Router::new()
        // Recommendations
        .route("/recommend", post(handlers::recommend))
        // Books
        .route("/books/search", get(handlers::search_books))
        .route("/books/:id", get(handlers::get_book))
        // Catalog
        .route("/catalog", get(handlers::catalog_info))
        .route("/catalog/reload", post(handlers::reload_catalog))
}
