//! HTTP handlers for visualization endpoints.
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::application::handlers::{
    CreateSessionHandler, GenerateVisualizationCommand, GenerateVisualizationHandler,
    GetSessionHandler, GetSessionQuery, ResetSessionCommand, ResetSessionHandler,
    VisualizeInSessionCommand, VisualizeInSessionHandler,
};
use crate::domain::foundation::{DomainError, ErrorCode, SessionId, ValidationError};
use crate::domain::visualization::{Concept, SessionError};
use crate::ports::SessionStore;

use super::dto::{
    ErrorResponse, HealthResponse, SessionResponse, VisualizeRequest, VisualizeResponse,
};

/// Served with every generated document. Scripts run, but the frame gets an
/// opaque origin.
pub const DOCUMENT_CSP: &str = "sandbox allow-scripts";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
#[derive(Clone)]
pub struct VisualizationAppState {
    pub session_store: Arc<dyn SessionStore>,
    pub generator: Arc<GenerateVisualizationHandler>,
}

impl VisualizationAppState {
    pub fn new(
        session_store: Arc<dyn SessionStore>,
        generator: Arc<GenerateVisualizationHandler>,
    ) -> Self {
        Self {
            session_store,
            generator,
        }
    }

    /// Create handlers on demand from the shared state.
    pub fn create_session_handler(&self) -> CreateSessionHandler {
        CreateSessionHandler::new(self.session_store.clone())
    }

    pub fn get_session_handler(&self) -> GetSessionHandler {
        GetSessionHandler::new(self.session_store.clone())
    }

    pub fn reset_session_handler(&self) -> ResetSessionHandler {
        ResetSessionHandler::new(self.session_store.clone())
    }

    pub fn visualize_in_session_handler(&self) -> VisualizeInSessionHandler {
        VisualizeInSessionHandler::new(self.session_store.clone(), self.generator.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /health - Liveness check
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse::ok())
}

/// POST /api/sessions - Create an idle session
pub async fn create_session(
    State(state): State<VisualizationAppState>,
) -> Result<impl IntoResponse, VisualizationApiError> {
    let session = state.create_session_handler().handle().await;
    Ok((StatusCode::CREATED, Json(SessionResponse::from(&session))))
}

/// GET /api/sessions/:session_id - Get session details
pub async fn get_session(
    State(state): State<VisualizationAppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, VisualizationApiError> {
    let query = GetSessionQuery {
        session_id: parse_session_id(&session_id)?,
    };

    let session = state.get_session_handler().handle(query).await?;

    Ok(Json(SessionResponse::from(&session)))
}

/// POST /api/sessions/:session_id/visualize - Run a cycle in a session
pub async fn visualize_in_session(
    State(state): State<VisualizationAppState>,
    Path(session_id): Path<String>,
    Json(req): Json<VisualizeRequest>,
) -> Result<impl IntoResponse, VisualizationApiError> {
    let cmd = VisualizeInSessionCommand {
        session_id: parse_session_id(&session_id)?,
        concept: Concept::new(&req.concept)?,
    };

    let session = state.visualize_in_session_handler().handle(cmd).await?;

    Ok(Json(VisualizeResponse::from_session(&session)))
}

/// GET /api/sessions/:session_id/document - Last document as sandboxed HTML
pub async fn get_document(
    State(state): State<VisualizationAppState>,
    Path(session_id): Path<String>,
) -> Result<Response, VisualizationApiError> {
    let session_id = parse_session_id(&session_id)?;
    let session = state
        .get_session_handler()
        .handle(GetSessionQuery { session_id })
        .await?;

    let outcome = session.outcome().ok_or_else(|| {
        VisualizationApiError(DomainError::new(
            ErrorCode::DocumentNotFound,
            format!("No document for session: {}", session_id),
        ))
    })?;

    Ok(sandboxed_html(outcome.html().to_string()))
}

/// DELETE /api/sessions/:session_id - Reset a session to idle
pub async fn reset_session(
    State(state): State<VisualizationAppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, VisualizationApiError> {
    let cmd = ResetSessionCommand {
        session_id: parse_session_id(&session_id)?,
    };

    state.reset_session_handler().handle(cmd).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/visualize - Stateless single cycle returning the document
pub async fn visualize(
    State(state): State<VisualizationAppState>,
    Json(req): Json<VisualizeRequest>,
) -> Result<Response, VisualizationApiError> {
    let cmd = GenerateVisualizationCommand {
        concept: Concept::new(&req.concept)?,
    };

    let outcome = state.generator.handle(cmd).await;

    Ok(sandboxed_html(outcome.html().to_string()))
}

fn parse_session_id(raw: &str) -> Result<SessionId, VisualizationApiError> {
    raw.parse::<SessionId>().map_err(|_| {
        ValidationError::invalid_format("session_id", format!("not a UUID: {}", raw)).into()
    })
}

fn sandboxed_html(html: String) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8"),
            (header::CONTENT_SECURITY_POLICY, DOCUMENT_CSP),
        ],
        html,
    )
        .into_response()
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts domain errors to HTTP responses.
#[derive(Debug)]
pub struct VisualizationApiError(pub DomainError);

impl From<DomainError> for VisualizationApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl From<SessionError> for VisualizationApiError {
    fn from(err: SessionError) -> Self {
        Self(err.into())
    }
}

impl From<ValidationError> for VisualizationApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for VisualizationApiError {
    fn into_response(self) -> Response {
        let status = match self.0.code {
            ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
            ErrorCode::SessionNotFound | ErrorCode::DocumentNotFound => StatusCode::NOT_FOUND,
            ErrorCode::GenerationInProgress | ErrorCode::InvalidStateTransition => {
                StatusCode::CONFLICT
            }
        };

        (status, Json(ErrorResponse::from(self.0))).into_response()
    }
}
