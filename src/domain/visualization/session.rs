//! Generation session aggregate.
//!
//! Holds the busy flag, the concept being visualized, and the last result for
//! one client session. All mutation goes through [`GenerationStatus`]
//! transitions.

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::concept::Concept;
use super::outcome::GenerationOutcome;
use super::status::GenerationStatus;
use crate::domain::foundation::{
    DomainError, ErrorCode, SessionId, StateMachine, ValidationError,
};

/// Errors raised by session operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(SessionId),

    #[error("A visualization is already being generated for this session")]
    Busy,

    #[error("Invalid state transition: {0}")]
    InvalidTransition(#[from] ValidationError),
}

impl From<SessionError> for DomainError {
    fn from(err: SessionError) -> Self {
        let code = match &err {
            SessionError::NotFound(_) => ErrorCode::SessionNotFound,
            SessionError::Busy => ErrorCode::GenerationInProgress,
            SessionError::InvalidTransition(_) => ErrorCode::InvalidStateTransition,
        };
        DomainError::new(code, err.to_string())
    }
}

/// One client's visualization session.
#[derive(Debug, Clone)]
pub struct GenerationSession {
    id: SessionId,
    status: GenerationStatus,
    concept: Option<Concept>,
    outcome: Option<GenerationOutcome>,
    created_at: DateTime<Utc>,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
}

impl GenerationSession {
    /// Creates an idle session.
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            status: GenerationStatus::Idle,
            concept: None,
            outcome: None,
            created_at: Utc::now(),
            started_at: None,
            finished_at: None,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn status(&self) -> GenerationStatus {
        self.status
    }

    pub fn is_busy(&self) -> bool {
        self.status.is_busy()
    }

    pub fn concept(&self) -> Option<&Concept> {
        self.concept.as_ref()
    }

    pub fn outcome(&self) -> Option<&GenerationOutcome> {
        self.outcome.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    /// Starts a cycle for `concept`.
    ///
    /// A finished session passes back through `Idle` first, so this is also
    /// the regenerate action. The previous outcome is cleared.
    pub fn begin(&mut self, concept: Concept) -> Result<(), SessionError> {
        if self.status.is_busy() {
            return Err(SessionError::Busy);
        }
        let mut status = self.status;
        if status.is_finished() {
            status = status.transition_to(GenerationStatus::Idle)?;
        }
        self.status = status.transition_to(GenerationStatus::Requesting)?;
        self.concept = Some(concept);
        self.outcome = None;
        self.started_at = Some(Utc::now());
        self.finished_at = None;
        Ok(())
    }

    /// Records the result of the in-flight cycle.
    pub fn complete(&mut self, outcome: GenerationOutcome) -> Result<(), SessionError> {
        let target = if outcome.is_rendered() {
            GenerationStatus::Succeeded
        } else {
            GenerationStatus::Failed
        };
        self.status = self.status.transition_to(target)?;
        self.outcome = Some(outcome);
        self.finished_at = Some(Utc::now());
        Ok(())
    }

    /// Clears the concept and result, returning to `Idle`.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        if self.status.is_busy() {
            return Err(SessionError::Busy);
        }
        if self.status.is_finished() {
            self.status = self.status.transition_to(GenerationStatus::Idle)?;
        }
        self.concept = None;
        self.outcome = None;
        self.started_at = None;
        self.finished_at = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::visualization::{
        ExtractionPath, FailureCategory, GenerationFailure, SanitizedDocument,
    };

    fn concept(s: &str) -> Concept {
        Concept::new(s).unwrap()
    }

    fn rendered() -> GenerationOutcome {
        GenerationOutcome::Rendered(SanitizedDocument::new(
            "<!DOCTYPE html><html></html>",
            ExtractionPath::FullDocument,
        ))
    }

    fn failed() -> GenerationOutcome {
        GenerationOutcome::failed(GenerationFailure::new(FailureCategory::Transport, "down"))
    }

    #[test]
    fn new_session_is_idle_and_empty() {
        let session = GenerationSession::new(SessionId::new());
        assert_eq!(session.status(), GenerationStatus::Idle);
        assert!(!session.is_busy());
        assert!(session.concept().is_none());
        assert!(session.outcome().is_none());
        assert!(session.started_at().is_none());
    }

    #[test]
    fn begin_marks_session_busy() {
        let mut session = GenerationSession::new(SessionId::new());
        session.begin(concept("recursion")).unwrap();

        assert_eq!(session.status(), GenerationStatus::Requesting);
        assert!(session.is_busy());
        assert_eq!(session.concept().map(Concept::as_str), Some("recursion"));
        assert!(session.started_at().is_some());
    }

    #[test]
    fn second_begin_while_requesting_is_busy() {
        let mut session = GenerationSession::new(SessionId::new());
        session.begin(concept("recursion")).unwrap();

        let result = session.begin(concept("sorting"));

        assert_eq!(result, Err(SessionError::Busy));
        assert_eq!(session.concept().map(Concept::as_str), Some("recursion"));
    }

    #[test]
    fn complete_with_document_succeeds() {
        let mut session = GenerationSession::new(SessionId::new());
        session.begin(concept("recursion")).unwrap();
        session.complete(rendered()).unwrap();

        assert_eq!(session.status(), GenerationStatus::Succeeded);
        assert!(session.outcome().unwrap().is_rendered());
        assert!(session.finished_at().is_some());
    }

    #[test]
    fn complete_with_failure_fails() {
        let mut session = GenerationSession::new(SessionId::new());
        session.begin(concept("recursion")).unwrap();
        session.complete(failed()).unwrap();

        assert_eq!(session.status(), GenerationStatus::Failed);
        assert!(session.outcome().unwrap().failure().is_some());
    }

    #[test]
    fn complete_without_begin_is_invalid() {
        let mut session = GenerationSession::new(SessionId::new());
        let result = session.complete(rendered());
        assert!(matches!(result, Err(SessionError::InvalidTransition(_))));
        assert!(session.outcome().is_none());
    }

    #[test]
    fn regenerate_after_completion_clears_previous_outcome() {
        let mut session = GenerationSession::new(SessionId::new());
        session.begin(concept("recursion")).unwrap();
        session.complete(failed()).unwrap();

        session.begin(concept("recursion")).unwrap();

        assert_eq!(session.status(), GenerationStatus::Requesting);
        assert!(session.outcome().is_none());
        assert!(session.finished_at().is_none());
    }

    #[test]
    fn reset_while_busy_is_rejected() {
        let mut session = GenerationSession::new(SessionId::new());
        session.begin(concept("recursion")).unwrap();

        assert_eq!(session.reset(), Err(SessionError::Busy));
        assert!(session.is_busy());
    }

    #[test]
    fn reset_after_completion_returns_to_idle() {
        let mut session = GenerationSession::new(SessionId::new());
        session.begin(concept("recursion")).unwrap();
        session.complete(rendered()).unwrap();

        session.reset().unwrap();

        assert_eq!(session.status(), GenerationStatus::Idle);
        assert!(session.concept().is_none());
        assert!(session.outcome().is_none());
    }

    #[test]
    fn reset_when_idle_is_a_no_op() {
        let mut session = GenerationSession::new(SessionId::new());
        assert!(session.reset().is_ok());
        assert_eq!(session.status(), GenerationStatus::Idle);
    }

    #[test]
    fn session_errors_map_to_codes() {
        let busy: DomainError = SessionError::Busy.into();
        assert_eq!(busy.code, ErrorCode::GenerationInProgress);

        let missing: DomainError = SessionError::NotFound(SessionId::new()).into();
        assert_eq!(missing.code, ErrorCode::SessionNotFound);
    }
}
