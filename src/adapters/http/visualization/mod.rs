//! HTTP adapter for visualization endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ErrorResponse, FailureResponse, HealthResponse, SessionResponse, VisualizeRequest,
    VisualizeResponse,
};
pub use handlers::{VisualizationApiError, VisualizationAppState, DOCUMENT_CSP};
pub use routes::{session_routes, visualization_router};
