/// Application routes configuration
use crate::handlers::{get_earthquake_data, health, AppState};
use axum::{
    routing::{get, post},
    Router,
};

/// Build the application router with all routes
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Earthquake data endpoint
        .route("/", post(get_earthquake_data))
        // Health check
        .route("/health", get(health))
        .with_state(state)
}
