//! Plan backend port.
//!
//! The plan backend turns a concept into a structured visualization plan.
//! Its payload is opaque to this service; it is only embedded in the
//! authoring prompt.

use async_trait::async_trait;

use crate::domain::visualization::{Concept, FailureCategory, StructuredPlan};

/// Port for fetching a structured plan for a concept.
#[async_trait]
pub trait PlanBackend: Send + Sync {
    /// Requests a plan for `concept`.
    ///
    /// # Errors
    ///
    /// - `Network` / `Timeout` when the backend cannot be reached
    /// - `Status` on a non-success response
    /// - `Parse` / `MissingPlan` when the body is unusable
    async fn fetch_plan(&self, concept: &Concept) -> Result<StructuredPlan, PlanError>;
}

/// Plan backend errors.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// Connection or transport failure.
    #[error("network error: {0}")]
    Network(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },

    /// Backend answered with a non-success status.
    #[error("plan backend returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },

    /// Response body was not valid JSON.
    #[error("parse error: {0}")]
    Parse(String),

    /// Response had no `visualization` payload.
    #[error("plan backend response had no visualization")]
    MissingPlan,
}

impl PlanError {
    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a status error.
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Classifies this error for logging and the error page.
    pub fn category(&self) -> FailureCategory {
        match self {
            PlanError::Network(_) | PlanError::Timeout { .. } => FailureCategory::Transport,
            PlanError::Status { .. } => FailureCategory::Status,
            PlanError::Parse(_) | PlanError::MissingPlan => FailureCategory::Payload,
        }
    }
}
