//! Request and response DTOs for visualization endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::foundation::DomainError;
use crate::domain::visualization::{
    ExtractionPath, FailureCategory, GenerationFailure, GenerationSession, GenerationStatus,
};

// ════════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════════

/// Body of both visualize endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct VisualizeRequest {
    pub concept: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            message: "Backend is live".to_string(),
        }
    }
}

/// Session view returned by create/get.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub status: GenerationStatus,
    pub busy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concept: Option<String>,
    pub has_visualization: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}

impl From<&GenerationSession> for SessionResponse {
    fn from(session: &GenerationSession) -> Self {
        Self {
            session_id: session.id().to_string(),
            status: session.status(),
            busy: session.is_busy(),
            concept: session.concept().map(|c| c.as_str().to_string()),
            has_visualization: session.outcome().is_some(),
            created_at: session.created_at(),
            started_at: session.started_at(),
            finished_at: session.finished_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureResponse {
    pub category: FailureCategory,
    pub message: String,
}

impl From<&GenerationFailure> for FailureResponse {
    fn from(failure: &GenerationFailure) -> Self {
        Self {
            category: failure.category,
            message: failure.message.clone(),
        }
    }
}

/// Result of a session-scoped visualize call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisualizeResponse {
    pub session_id: String,
    pub concept: String,
    pub status: GenerationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extraction_path: Option<ExtractionPath>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<FailureResponse>,
    pub document: String,
}

impl VisualizeResponse {
    /// Builds the response from a session that has just completed a cycle.
    pub fn from_session(session: &GenerationSession) -> Self {
        let outcome = session.outcome();
        Self {
            session_id: session.id().to_string(),
            concept: session
                .concept()
                .map(|c| c.as_str().to_string())
                .unwrap_or_default(),
            status: session.status(),
            extraction_path: outcome.and_then(|o| o.extraction_path()),
            error: outcome.and_then(|o| o.failure()).map(FailureResponse::from),
            document: outcome.map(|o| o.html().to_string()).unwrap_or_default(),
        }
    }
}

/// JSON body for every API error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub details: HashMap<String, String>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: HashMap::new(),
        }
    }
}

impl From<DomainError> for ErrorResponse {
    fn from(err: DomainError) -> Self {
        Self {
            code: err.code.to_string(),
            message: err.message,
            details: err.details,
        }
    }
}
