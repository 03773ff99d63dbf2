/// Application routes configuration
use crate::handlers::{get_apod, get_manifest, health, index, query_photos, AppState};
use axum::{routing::get, Router};
use std::path::Path;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Build the application router with all routes
pub fn build_router(state: AppState, assets_dir: &Path) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health))
        // Dashboard page
        .route("/", get(index))
        // NASA proxy endpoints
        .route("/apod/:date", get(get_apod))
        .route("/manifests/:roverName", get(get_manifest))
        .route("/query", get(query_photos))
        .nest_service("/assets", ServeDir::new(assets_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
