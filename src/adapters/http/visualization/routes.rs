//! Axum router configuration for visualization endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_session, get_document, get_session, health, reset_session, visualize,
    visualize_in_session, VisualizationAppState,
};

/// Create the session API router.
///
/// # Routes
/// - `POST /` - Create an idle session
/// - `GET /:session_id` - Session view
/// - `DELETE /:session_id` - Reset to idle
/// - `POST /:session_id/visualize` - Run a cycle
/// - `GET /:session_id/document` - Last document as sandboxed HTML
pub fn session_routes() -> Router<VisualizationAppState> {
    Router::new()
        .route("/", post(create_session))
        .route("/:session_id", get(get_session).delete(reset_session))
        .route("/:session_id/visualize", post(visualize_in_session))
        .route("/:session_id/document", get(get_document))
}

/// Create the complete visualization router.
///
/// # Example
///
/// ```ignore
/// let state = VisualizationAppState::new(store, generator);
/// let app = visualization_router().with_state(state);
/// ```
pub fn visualization_router() -> Router<VisualizationAppState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/visualize", post(visualize))
        .nest("/api/sessions", session_routes())
}
