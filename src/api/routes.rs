//! Router construction.

use super::{
    AppState,
    handlers::{
        create_item, delete_item, health, list_items, list_sections, not_found, vocabulary,
    },
};
use axum::{
    Router,
    routing::{delete, get},
};
use tower_http::trace::TraceLayer;

/// Builds the application router with all pantry routes.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/vocabulary", get(vocabulary))
        .route("/api/pantry", get(list_items).post(create_item))
        .route("/api/pantry/sections", get(list_sections))
        .route("/api/pantry/:id", delete(delete_item))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
